use crate::model::PublishingPolicy;
use serde_json::Value;

/// Publishing-aware emission filter: rewrites a record suppressed at
/// `now_ms` to a tombstone and passes every other value through unchanged.
/// Tombstones pass through as tombstones.
pub fn mask_suppressed(value: Option<Value>, now_ms: i64) -> Option<Value> {
    let value = value?;
    if PublishingPolicy::of(Some(&value)).suppressed_at(now_ms) {
        return None;
    }
    Some(value)
}
