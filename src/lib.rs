//! Deferred-publication stream processing core: records carrying a privacy
//! policy are masked on the output stream while private, and republished
//! through the input path once their publication deadline elapses.

pub mod config;

pub mod model {
    pub mod policy;
    pub mod record;

    pub use policy::*;
    pub use record::*;
}

pub mod store {
    pub mod deadline;
    pub mod lookup;
    pub mod snapshot;

    pub use deadline::*;
    pub use lookup::*;
    pub use snapshot::*;
}

pub mod engine {
    pub mod emitter;
    pub mod normalizer;
    pub mod publisher;
    pub mod topology;

    pub use emitter::*;
    pub use normalizer::*;
    pub use publisher::*;
    pub use topology::*;
}

pub mod runtime {
    pub mod clock;
    pub mod driver;

    pub use clock::*;
    pub use driver::*;
}

pub use config::{ConfigError, TopologyConfig, DEFAULT_SCAN_INTERVAL_MS};
pub use engine::{
    mask_suppressed, normalize_body, DeadlineDecision, DelayedPublisher, PublishingTopology,
};
pub use model::{
    parse_instant_ms, PublishingPolicy, StreamRecord, PRIVATE_FIELD, PUBLISHING_FIELD, UNTIL_FIELD,
};
pub use runtime::{ManualClock, SystemWallClock, TopologyDriver, WallClock};
pub use store::{DeadlineBucket, DeadlineIndex, LookupStore, SnapshotError, TopologySnapshot};
