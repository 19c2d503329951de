//! Processing-result value object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured output of a file's processing pipeline, stored as a JSON
/// object alongside the file (transcription text for audio assets, for
/// example).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessingResult(Map<String, Value>);

impl ProcessingResult {
    /// Parse from a stored JSON value. Non-object values yield an empty result.
    pub fn from_json_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.clone()),
            _ => Self::default(),
        }
    }

    /// Convert to a `serde_json::Value`.
    pub fn into_json_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Shallow merge: keys in `other` overwrite keys in `self`, other keys survive.
    pub fn merge(mut self, other: ProcessingResult) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites_and_keeps() {
        let base = ProcessingResult::from_json_value(&json!({"transcription": "old", "lang": "en"}));
        let update = ProcessingResult::from_json_value(&json!({"transcription": "new"}));
        let merged = base.merge(update).into_json_value();
        assert_eq!(merged, json!({"transcription": "new", "lang": "en"}));
    }

    #[test]
    fn test_non_object_is_empty() {
        let result = ProcessingResult::from_json_value(&json!(["not", "an", "object"]));
        assert_eq!(result, ProcessingResult::default());
        assert!(result.get("transcription").is_none());
    }
}
