use crate::model::{PublishingPolicy, StreamRecord};
use crate::store::{DeadlineIndex, LookupStore};
use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of applying one change event to the deadline indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineDecision {
    /// No deadline was active and none is wanted.
    Idle,
    /// An active deadline was removed.
    Cancelled { at_ms: i64 },
    /// A deadline was registered for a key that had none.
    Registered { at_ms: i64 },
    /// The key moved from one deadline to another.
    Rescheduled { from_ms: i64, to_ms: i64 },
    /// The update re-stated the deadline already in force.
    Unchanged { at_ms: i64 },
}

/// Stateful transformer over the lookup-table change stream. Per event it
/// decides whether the key holds a publication deadline; per scan it drains
/// due buckets and re-emits the stored bodies into the input stream so the
/// normal change-propagation path re-evaluates them.
#[derive(Debug)]
pub struct DelayedPublisher {
    index: DeadlineIndex,
}

impl DelayedPublisher {
    /// Wraps the deadline indexes.
    pub fn new(index: DeadlineIndex) -> Self {
        Self { index }
    }

    /// Read access to the deadline indexes.
    pub fn index(&self) -> &DeadlineIndex {
        &self.index
    }

    /// Applies the deadline decision table for one `(key, value)` change
    /// event observed at `now_ms`. A record that is not private, has no
    /// `until`, or whose `until` is not strictly in the future cancels any
    /// active deadline; a future `until` registers, reschedules, or leaves
    /// the registration untouched when it re-states the active deadline.
    pub fn observe(&mut self, key: &str, value: Option<&Value>, now_ms: i64) -> DeadlineDecision {
        let policy = PublishingPolicy::of(value);
        let active = self.index.deadline_for(key);
        let decision = match (policy.pending_deadline(now_ms), active) {
            (None, None) => DeadlineDecision::Idle,
            (None, Some(at_ms)) => {
                self.index.cancel(key);
                DeadlineDecision::Cancelled { at_ms }
            }
            (Some(at_ms), None) => {
                self.index.register(key, at_ms);
                DeadlineDecision::Registered { at_ms }
            }
            (Some(to_ms), Some(from_ms)) if from_ms == to_ms => {
                DeadlineDecision::Unchanged { at_ms: to_ms }
            }
            (Some(to_ms), Some(from_ms)) => {
                self.index.register(key, to_ms);
                DeadlineDecision::Rescheduled { from_ms, to_ms }
            }
        };
        match decision {
            DeadlineDecision::Cancelled { at_ms } => {
                debug!(key, at_ms, "publication deadline cancelled");
            }
            DeadlineDecision::Registered { at_ms } => {
                debug!(key, at_ms, "publication deadline registered");
            }
            DeadlineDecision::Rescheduled { from_ms, to_ms } => {
                debug!(key, from_ms, to_ms, "publication deadline rescheduled");
            }
            DeadlineDecision::Idle | DeadlineDecision::Unchanged { .. } => {}
        }
        decision
    }

    /// Drains every bucket due at `now_ms` and returns the records to feed
    /// back into the input stream: the stored body of each drained key, in
    /// ascending deadline order and registration order within a bucket. A
    /// drained key whose lookup entry has vanished is dropped from the
    /// bucket.
    pub fn scan(&mut self, now_ms: i64, lookup: &LookupStore) -> Vec<StreamRecord> {
        let mut republished = Vec::new();
        for bucket in self.index.take_due(now_ms) {
            for key in bucket.keys {
                match lookup.get(&key) {
                    Some(body) => republished.push(StreamRecord::new(key, body.clone())),
                    None => {
                        warn!(
                            key = %key,
                            at_ms = bucket.at_ms,
                            store = lookup.name(),
                            "lookup entry missing at scan, dropping key from due bucket"
                        );
                    }
                }
            }
        }
        republished
    }
}
