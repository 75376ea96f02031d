// pn532-tap/src/reader/mod.rs

//! Long-running worker: reconnect supervision, tap de-duplication,
//! heartbeats and retry accounting.

pub mod debounce;
pub mod heartbeat;
pub mod retry;
pub mod supervisor;

pub use debounce::{TapDebouncer, TapRecord};
pub use heartbeat::HeartbeatScheduler;
pub use retry::{backoff, RetryDecision, RetryState};
pub use supervisor::{ExitStatus, ReconnectSupervisor, SupervisorState, BACKOFF_SLICE};
