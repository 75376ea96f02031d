// pn532-tap/src/device/mod.rs

pub mod channel;
pub mod controller;

pub use channel::CommandChannel;
pub use controller::{Initialized, TargetController, Timings, Uninitialized};
