use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock source in epoch milliseconds. Publication deadlines are
/// absolute instants, so this is a real-time clock rather than a monotonic
/// one.
pub trait WallClock {
    /// Current instant in milliseconds since the Unix epoch.
    fn now_ms(&mut self) -> i64;
}

/// System clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now_ms(&mut self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Manually advanced clock for tests and embeddings that own time.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now_ms: i64,
}

impl ManualClock {
    /// Creates a clock pinned at the given instant.
    pub fn starting_at(now_ms: i64) -> Self {
        Self { now_ms }
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, delta_ms: i64) {
        self.now_ms += delta_ms;
    }

    /// Pins the clock to an absolute instant.
    pub fn set(&mut self, now_ms: i64) {
        self.now_ms = now_ms;
    }

    /// Current reading.
    pub fn peek(&self) -> i64 {
        self.now_ms
    }
}

impl WallClock for ManualClock {
    fn now_ms(&mut self) -> i64 {
        self.now_ms
    }
}
