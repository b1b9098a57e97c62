use crate::config::{ConfigError, TopologyConfig};
use crate::engine::topology::PublishingTopology;
use crate::model::StreamRecord;
use crate::runtime::clock::{ManualClock, WallClock};
use serde_json::Value;

/// Embeddable driver for one partition. It owns the topology, the wall
/// clock and the scan schedule: scans fire between input events, never
/// concurrently with one, and republished records re-enter the input path
/// before newer events are accepted.
#[derive(Debug)]
pub struct TopologyDriver<C: WallClock> {
    topology: PublishingTopology,
    clock: C,
    next_scan_ms: i64,
    outputs: Vec<StreamRecord>,
}

impl<C: WallClock> TopologyDriver<C> {
    /// Builds the driver and schedules the first scan one interval out.
    pub fn new(config: TopologyConfig, mut clock: C) -> Result<Self, ConfigError> {
        let topology = PublishingTopology::new(config)?;
        let next_scan_ms = clock.now_ms() + topology.config().scan_interval_ms as i64;
        Ok(Self {
            topology,
            clock,
            next_scan_ms,
            outputs: Vec::new(),
        })
    }

    /// Read access to the wired topology.
    pub fn topology(&self) -> &PublishingTopology {
        &self.topology
    }

    /// Feeds one input record. Scans that came due since the last call fire
    /// first.
    pub fn pipe(&mut self, key: impl Into<String>, value: Option<Value>) {
        let now_ms = self.clock.now_ms();
        self.fire_due_scans(now_ms);
        let output = self.topology.apply(
            StreamRecord {
                key: key.into(),
                value,
            },
            now_ms,
        );
        self.outputs.push(output);
    }

    /// Fires any scan due at the current clock reading.
    pub fn poll(&mut self) {
        let now_ms = self.clock.now_ms();
        self.fire_due_scans(now_ms);
    }

    /// Takes the outputs accumulated so far, in emission order.
    pub fn drain(&mut self) -> Vec<StreamRecord> {
        std::mem::take(&mut self.outputs)
    }

    fn fire_due_scans(&mut self, now_ms: i64) {
        if self.next_scan_ms > now_ms {
            return;
        }
        let interval = self.topology.config().scan_interval_ms as i64;
        self.outputs.extend(self.topology.run_scan(now_ms));
        while self.next_scan_ms <= now_ms {
            self.next_scan_ms += interval;
        }
    }
}

impl TopologyDriver<ManualClock> {
    /// Advances the wall clock, firing every scheduled scan boundary crossed
    /// along the way at its own instant.
    pub fn advance(&mut self, delta_ms: i64) {
        let target_ms = self.clock.peek() + delta_ms;
        while self.next_scan_ms <= target_ms {
            let boundary_ms = self.next_scan_ms;
            self.clock.set(boundary_ms);
            self.poll();
        }
        self.clock.set(target_ms);
    }
}
