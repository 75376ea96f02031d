// pn532-tap/src/reader/retry.rs

use std::time::Duration;

/// Outcome of recording a failed connection or scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { attempt: u32, wait: Duration },
    GiveUp { attempts: u32 },
}

/// Consecutive-failure counter with exponential backoff (2^attempt s).
#[derive(Debug, Clone)]
pub struct RetryState {
    attempt: u32,
    ceiling: u32,
}

impl RetryState {
    pub fn new(ceiling: u32) -> Self {
        Self {
            attempt: 0,
            ceiling: ceiling.max(1),
        }
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Count a failure. Reaching the ceiling gives up.
    pub fn record_failure(&mut self) -> RetryDecision {
        self.attempt = self.attempt.saturating_add(1);
        if self.attempt >= self.ceiling {
            RetryDecision::GiveUp {
                attempts: self.attempt,
            }
        } else {
            RetryDecision::Retry {
                attempt: self.attempt,
                wait: backoff(self.attempt),
            }
        }
    }

    /// Called after a successful connect.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

/// 2^attempt seconds.
pub fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1u64.checked_shl(attempt).unwrap_or(u64::MAX))
}
