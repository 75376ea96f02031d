//! Timeout helpers used across the crate.
//!
//! Centralizes the serial read timeout and the per-step command timeouts so
//! tests and code express them in milliseconds.

use std::time::Duration;

/// Default read timeout in milliseconds used by transports when a caller
/// doesn't provide an explicit timeout.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Longest single blocking read issued while waiting for a frame; keeps
/// cancellation latency bounded.
pub const READ_SLICE_MS: u64 = 50;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
