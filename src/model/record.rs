use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A keyed record on the input or output stream. A `None` value is the
/// tombstone marker: the key is deleted or currently suppressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub key: String,
    pub value: Option<Value>,
}

impl StreamRecord {
    /// Creates a record carrying a body.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
        }
    }

    /// Creates a tombstone for the key.
    pub fn tombstone(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Returns true when the record carries no body.
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}
