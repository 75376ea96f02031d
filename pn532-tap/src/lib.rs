// pn532-tap/src/lib.rs

//! pn532-tap
//!
//! PN532 NFC controller driver over HSU (UART) for point-of-sale terminals:
//! reports card taps to a parent process as JSON lines and can emulate a
//! Type 4 tag serving an NDEF text record.

pub mod cancel;
pub mod clock;
pub mod config;
pub mod constants;
pub mod device;
pub mod emulation;
pub mod error;
pub mod events;
pub mod ndef;
pub mod prelude;
pub mod protocol;
pub mod reader;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::cancel::CancellationToken;
pub use crate::error::*;
pub use crate::types::*;
