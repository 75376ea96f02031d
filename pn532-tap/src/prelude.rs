// pn532-tap/src/prelude.rs

pub use crate::cancel::CancellationToken;
pub use crate::clock::{Clock, SystemClock};
pub use crate::config::{Config, Mode};
pub use crate::device::{Initialized, TargetController, Timings, Uninitialized};
pub use crate::events::{Event, EventEmitter};
pub use crate::protocol::{Command, Response};
pub use crate::reader::{ExitStatus, ReconnectSupervisor};
pub use crate::transport::{Connector, Transport};
pub use crate::{Error, ErrorKind, FirmwareVersion, InitiatorInfo, Result, Uid};

#[cfg(feature = "serial")]
pub use crate::transport::SerialConnector;

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex_spaced, bytes_to_hex_upper, ms};
