use crate::config::{ConfigError, TopologyConfig};
use crate::engine::emitter::mask_suppressed;
use crate::engine::normalizer::normalize_body;
use crate::engine::publisher::DelayedPublisher;
use crate::model::StreamRecord;
use crate::store::{DeadlineIndex, LookupStore, SnapshotError, TopologySnapshot};

/// The wired core for one partition: each input record is normalized into
/// the lookup table, and the resulting change event drives both the delayed
/// publisher's indexes and the publishing-aware output filter.
#[derive(Debug)]
pub struct PublishingTopology {
    config: TopologyConfig,
    lookup: LookupStore,
    publisher: DelayedPublisher,
}

impl PublishingTopology {
    /// Builds an empty topology from a validated configuration.
    pub fn new(config: TopologyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let lookup = LookupStore::new(&config.lookup_store_name);
        let index = DeadlineIndex::new(&config.key_store_name, &config.time_store_name);
        Ok(Self {
            config,
            lookup,
            publisher: DelayedPublisher::new(index),
        })
    }

    /// The configuration the topology was built from.
    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// Read access to the materialized view.
    pub fn lookup(&self) -> &LookupStore {
        &self.lookup
    }

    /// Read access to the deadline indexes.
    pub fn deadlines(&self) -> &DeadlineIndex {
        self.publisher.index()
    }

    /// Processes one input record at `now_ms` and returns the change event
    /// as seen on the output stream.
    pub fn apply(&mut self, record: StreamRecord, now_ms: i64) -> StreamRecord {
        let StreamRecord { key, value } = record;
        let normalized = normalize_body(value);
        self.lookup.apply(&key, normalized.as_ref());
        self.publisher.observe(&key, normalized.as_ref(), now_ms);
        StreamRecord {
            value: mask_suppressed(normalized, now_ms),
            key,
        }
    }

    /// Runs one wall-clock scan at `now_ms`. Due records re-enter the input
    /// path immediately, and the outputs their re-evaluation produces are
    /// returned in order. A no-op when nothing is due.
    pub fn run_scan(&mut self, now_ms: i64) -> Vec<StreamRecord> {
        let republished = self.publisher.scan(now_ms, &self.lookup);
        republished
            .into_iter()
            .map(|record| self.apply(record, now_ms))
            .collect()
    }

    /// Captures the durable state of the three stores.
    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot::capture(&self.lookup, self.publisher.index())
    }

    /// Rebuilds a topology from persisted state. The first scan after
    /// restore catches up deadlines that elapsed while the task was down.
    pub fn restore(
        config: TopologyConfig,
        snapshot: &TopologySnapshot,
    ) -> Result<Self, SnapshotError> {
        config.validate()?;
        let lookup = snapshot.hydrate_lookup(&config.lookup_store_name);
        let index =
            snapshot.hydrate_deadlines(&config.key_store_name, &config.time_store_name)?;
        Ok(Self {
            config,
            lookup,
            publisher: DelayedPublisher::new(index),
        })
    }
}
