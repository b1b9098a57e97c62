use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One `time-index` bucket: every key sharing a deadline, in registration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineBucket {
    pub at_ms: i64,
    pub keys: Vec<String>,
}

/// Paired secondary indexes for publication deadlines: record-key to
/// deadline, and deadline to record-keys in registration order. A key holds
/// at most one active deadline; the bucket map is ordered so due deadlines
/// drain in ascending order. Empty buckets are deleted, not stored.
#[derive(Debug, Clone)]
pub struct DeadlineIndex {
    key_store_name: String,
    time_store_name: String,
    by_key: HashMap<String, i64>,
    by_time: BTreeMap<i64, Vec<String>>,
}

impl DeadlineIndex {
    /// Creates empty indexes labelled with their configured store names.
    pub fn new(key_store_name: impl Into<String>, time_store_name: impl Into<String>) -> Self {
        Self {
            key_store_name: key_store_name.into(),
            time_store_name: time_store_name.into(),
            by_key: HashMap::new(),
            by_time: BTreeMap::new(),
        }
    }

    /// Identifier of the key-to-deadline store.
    pub fn key_store_name(&self) -> &str {
        &self.key_store_name
    }

    /// Identifier of the deadline-to-keys store.
    pub fn time_store_name(&self) -> &str {
        &self.time_store_name
    }

    /// Active deadline for the key, if any.
    pub fn deadline_for(&self, key: &str) -> Option<i64> {
        self.by_key.get(key).copied()
    }

    /// Keys registered at a deadline, in registration order.
    pub fn bucket(&self, at_ms: i64) -> Option<&[String]> {
        self.by_time.get(&at_ms).map(Vec::as_slice)
    }

    /// All buckets in ascending deadline order.
    pub fn buckets(&self) -> impl Iterator<Item = (i64, &[String])> + '_ {
        self.by_time
            .iter()
            .map(|(at_ms, keys)| (*at_ms, keys.as_slice()))
    }

    /// Number of keys holding an active deadline.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// True when no key holds a deadline.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Registers `key` at `at_ms`, superseding any previous deadline. The
    /// key is appended to the bucket at `at_ms`. Returns the previous
    /// deadline when the key moved.
    pub fn register(&mut self, key: &str, at_ms: i64) -> Option<i64> {
        let previous = self.cancel(key);
        self.by_key.insert(key.to_string(), at_ms);
        self.by_time.entry(at_ms).or_default().push(key.to_string());
        previous
    }

    /// Removes the key's deadline from both indexes. Returns the cancelled
    /// deadline.
    pub fn cancel(&mut self, key: &str) -> Option<i64> {
        let at_ms = self.by_key.remove(key)?;
        if let Some(keys) = self.by_time.get_mut(&at_ms) {
            keys.retain(|entry| entry != key);
            if keys.is_empty() {
                self.by_time.remove(&at_ms);
            }
        }
        Some(at_ms)
    }

    /// Drains every bucket due at `now_ms` in ascending deadline order,
    /// removing the drained keys from both indexes. Buckets strictly in the
    /// future are untouched.
    pub fn take_due(&mut self, now_ms: i64) -> Vec<DeadlineBucket> {
        let due: Vec<i64> = self.by_time.range(..=now_ms).map(|(at_ms, _)| *at_ms).collect();
        due.into_iter()
            .map(|at_ms| {
                let keys = self.by_time.remove(&at_ms).unwrap_or_default();
                for key in &keys {
                    self.by_key.remove(key);
                }
                DeadlineBucket { at_ms, keys }
            })
            .collect()
    }
}
