// pn532-tap/src/reader/debounce.rs

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapRecord {
    pub uid: String,
    pub observed_at: Instant,
}

/// Suppresses re-taps of the same card within a time window. Only the
/// most recent `capacity` taps are remembered. UIDs compare
/// case-insensitively.
#[derive(Debug)]
pub struct TapDebouncer {
    window: Duration,
    capacity: usize,
    records: VecDeque<TapRecord>,
}

impl TapDebouncer {
    pub fn new(window: Duration, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window,
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// True when `uid` was recorded less than the window ago.
    pub fn is_duplicate(&self, uid: &str, now: Instant) -> bool {
        let uid = normalize(uid);
        self.records.iter().any(|r| {
            r.uid == uid && now.saturating_duration_since(r.observed_at) < self.window
        })
    }

    /// Remember a tap, evicting the oldest record when full.
    pub fn record(&mut self, uid: &str, now: Instant) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(TapRecord {
            uid: normalize(uid),
            observed_at: now,
        });
    }

    /// Check-and-record in one step. Returns `true` when the tap should be
    /// reported.
    pub fn accept(&mut self, uid: &str, now: Instant) -> bool {
        if self.is_duplicate(uid, now) {
            return false;
        }
        self.record(uid, now);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

fn normalize(uid: &str) -> String {
    uid.to_ascii_uppercase()
}
