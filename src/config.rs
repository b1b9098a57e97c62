use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cadence of the wall-clock scan.
pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 500;

const DEFAULT_LOOKUP_STORE: &str = "publish-lookup";
const DEFAULT_KEY_STORE: &str = "publish-deadline-keys";
const DEFAULT_TIME_STORE: &str = "publish-deadline-times";

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("scan interval must be non-zero")]
    ZeroScanInterval,
    #[error("store name for the {role} store must not be empty")]
    EmptyStoreName { role: &'static str },
    #[error("store name {name:?} is used for more than one store")]
    DuplicateStoreName { name: String },
}

/// Topology configuration. Store names identify the persisted indexes; the
/// scan interval bounds republish latency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    pub lookup_store_name: String,
    pub key_store_name: String,
    pub time_store_name: String,
    pub scan_interval_ms: u64,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            lookup_store_name: DEFAULT_LOOKUP_STORE.to_string(),
            key_store_name: DEFAULT_KEY_STORE.to_string(),
            time_store_name: DEFAULT_TIME_STORE.to_string(),
            scan_interval_ms: DEFAULT_SCAN_INTERVAL_MS,
        }
    }
}

impl TopologyConfig {
    /// Validates interval and store-name constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_interval_ms == 0 {
            return Err(ConfigError::ZeroScanInterval);
        }
        let names = [
            ("lookup", self.lookup_store_name.as_str()),
            ("key-index", self.key_store_name.as_str()),
            ("time-index", self.time_store_name.as_str()),
        ];
        for (role, name) in names {
            if name.is_empty() {
                return Err(ConfigError::EmptyStoreName { role });
            }
        }
        for (idx, (_, name)) in names.iter().enumerate() {
            if names[..idx].iter().any(|(_, earlier)| earlier == name) {
                return Err(ConfigError::DuplicateStoreName {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
