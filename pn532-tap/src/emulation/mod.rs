// pn532-tap/src/emulation/mod.rs

//! Type 4 tag emulation: the chip is put in target mode and answers a
//! phone's SELECT / READ BINARY APDUs with an NDEF payload.

pub mod apdu;
pub mod session;

pub use apdu::Apdu;
pub use session::{CardEmulationSession, SessionState, SessionSummary};
