// Shared helpers for the integration test crates. Each aggregator pulls
// this in through `#[path]`, so not every helper is used everywhere.
#![allow(dead_code)]

pub mod fixtures;

pub use pn532_tap::test_support::{
    device_frame, fast_timings, initialized_controller, ready_replies, reply, scripted_chip,
    ScriptedConnector, SharedSink,
};

/// Decode a hex fixture (whitespace allowed).
pub fn h(s: &str) -> Vec<u8> {
    let compact: String = s.split_whitespace().collect();
    hex::decode(compact).expect("valid hex fixture")
}
