use super::deadline::{DeadlineBucket, DeadlineIndex};
use super::lookup::LookupStore;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised when persisting or restoring topology state.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("key {key:?} appears in more than one deadline bucket")]
    DuplicateKey { key: String },
    #[error("deadline bucket at {at_ms} is empty")]
    EmptyBucket { at_ms: i64 },
}

/// Durable image of the three stores. The key-to-deadline index is
/// derivable from the buckets and is rebuilt on restore.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub lookup: BTreeMap<String, Value>,
    pub deadlines: Vec<DeadlineBucket>,
}

impl TopologySnapshot {
    /// Captures the current store contents.
    pub fn capture(lookup: &LookupStore, deadlines: &DeadlineIndex) -> Self {
        Self {
            lookup: lookup
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            deadlines: deadlines
                .buckets()
                .map(|(at_ms, keys)| DeadlineBucket {
                    at_ms,
                    keys: keys.to_vec(),
                })
                .collect(),
        }
    }

    /// Serializes the snapshot to JSON for storage.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a snapshot from JSON.
    pub fn from_json(payload: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Rebuilds the lookup store from the snapshot.
    pub(crate) fn hydrate_lookup(&self, name: &str) -> LookupStore {
        let mut store = LookupStore::new(name);
        for (key, value) in &self.lookup {
            store.apply(key, Some(value));
        }
        store
    }

    /// Rebuilds the deadline indexes, validating structural integrity: no
    /// empty buckets, no key in more than one bucket.
    pub(crate) fn hydrate_deadlines(
        &self,
        key_store_name: &str,
        time_store_name: &str,
    ) -> Result<DeadlineIndex, SnapshotError> {
        let mut index = DeadlineIndex::new(key_store_name, time_store_name);
        for bucket in &self.deadlines {
            if bucket.keys.is_empty() {
                return Err(SnapshotError::EmptyBucket { at_ms: bucket.at_ms });
            }
            for key in &bucket.keys {
                if index.deadline_for(key).is_some() {
                    return Err(SnapshotError::DuplicateKey { key: key.clone() });
                }
                index.register(key, bucket.at_ms);
            }
        }
        Ok(index)
    }
}
