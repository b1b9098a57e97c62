use serde_json::Value;
use std::collections::HashMap;

/// Latest-value-per-key materialized view. The merge rule is "take the new
/// value"; a tombstone deletes the entry.
#[derive(Debug, Clone, Default)]
pub struct LookupStore {
    name: String,
    entries: HashMap<String, Value>,
}

impl LookupStore {
    /// Creates an empty store labelled with its configured name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Store identifier configured by the embedding.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies a change event: the new value supersedes the previous one, a
    /// tombstone removes the entry.
    pub fn apply(&mut self, key: &str, value: Option<&Value>) {
        match value {
            Some(value) => {
                self.entries.insert(key.to_string(), value.clone());
            }
            None => {
                self.entries.remove(key);
            }
        }
    }

    /// Latest value stored for the key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// True when the key has a stored value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys with a stored value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no key has a stored value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the stored entries (iteration order is unspecified).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}
