// GitHub API response types.
// Event records from the public events feed, deserialized field by field so a
// malformed field degrades to its default instead of failing the whole feed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient::{lenient, lenient_seq};

/// Repository reference attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRepo {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
}

/// Commit summary inside a push event payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCommit {
    #[serde(default, deserialize_with = "lenient")]
    pub message: String,
}

/// Event payload. Only push events carry commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub commits: Vec<EventCommit>,
}

/// A single record from `/users/{user}/events/public`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient")]
    pub repo: EventRepo,
    #[serde(default, deserialize_with = "lenient")]
    pub payload: EventPayload,
}

impl Event {
    /// Build an event from an arbitrary JSON value; non-objects become an empty event.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Commit messages carried by this event, in payload order.
    pub fn commit_messages(&self) -> impl Iterator<Item = &str> {
        self.payload.commits.iter().map(|c| c.message.as_str())
    }
}
