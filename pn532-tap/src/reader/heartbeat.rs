// pn532-tap/src/reader/heartbeat.rs

use std::time::{Duration, Instant};

/// Decides when a liveness event is due.
#[derive(Debug, Clone)]
pub struct HeartbeatScheduler {
    interval: Duration,
    last_emitted: Instant,
}

impl HeartbeatScheduler {
    /// The first heartbeat is due one `interval` after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_emitted: now,
        }
    }

    /// Returns `true` (and restarts the interval) when at least `interval`
    /// elapsed since the last heartbeat.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_emitted) >= self.interval {
            self.last_emitted = now;
            true
        } else {
            false
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_emitted(&self) -> Instant {
        self.last_emitted
    }
}
