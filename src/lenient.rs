// Tolerant field deserializers for upstream JSON.
// A field with an unexpected shape becomes its default; only the document
// structure itself can fail a parse.

use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;

/// Deserialize a field, falling back to its default when the value has the wrong shape.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize a list element by element, defaulting malformed entries.
/// A value that is not a list at all yields an empty list.
pub fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient")]
        name: String,
        #[serde(default, deserialize_with = "lenient_seq")]
        tags: Vec<String>,
    }

    #[test]
    fn test_wrong_shapes_default() {
        let sample: Sample = serde_json::from_value(json!({ "name": [1], "tags": "x" })).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_mixed_list() {
        let sample: Sample =
            serde_json::from_value(json!({ "name": "a", "tags": ["x", 2, "y"] })).unwrap();
        assert_eq!(sample.name, "a");
        assert_eq!(sample.tags, vec!["x", "", "y"]);
    }
}
