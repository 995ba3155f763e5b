// Event digest construction.
// Condenses raw events into short text lines before they go into a prompt.

use std::fmt::Write;

use super::types::Event;

/// Maximum number of events included in a digest.
pub const MAX_DIGEST_EVENTS: usize = 30;

/// Render one event as a digest line (newline-terminated).
///
/// Format: `- {kind} on {repo}` followed by `: {message}` for each commit.
pub fn digest_line(event: &Event) -> String {
    let mut line = format!("- {} on {}", event.kind, event.repo.name);
    for message in event.commit_messages() {
        let _ = write!(line, ": {}", message);
    }
    line.push('\n');
    line
}

/// Build a digest from events in the order the API returned them, capped at
/// [`MAX_DIGEST_EVENTS`].
pub fn build_digest<'a, I>(events: I) -> String
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .take(MAX_DIGEST_EVENTS)
        .map(digest_line)
        .collect()
}
