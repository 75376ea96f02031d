// pn532-tap/src/types.rs

use std::fmt;

/// Tag / device identifier (NFCID1) - Newtype Pattern (4, 7 or 10 バイト)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uid(Vec<u8>);

impl Uid {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Uppercase hex without separators, the form reported over IPC.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_upper(&self.0)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// GetFirmwareVersion reply: IC, Ver, Rev, Support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub ic: u8,
    pub version: u8,
    pub revision: u8,
    pub support: u8,
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.version, self.revision)
    }
}

/// ISO14443A target reported by InListPassiveTarget (106 kbps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassiveTarget {
    pub tg: u8,
    pub sens_res: [u8; 2],
    pub sel_res: u8,
    pub uid: Uid,
    /// Answer-to-select, present when SEL_RES announces ISO14443-4.
    pub ats: Vec<u8>,
}

/// Initiator seen by TgInitAsTarget once a reader (e.g. a phone) activated
/// the emulated tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatorInfo {
    /// Activated mode byte (baud rate / ISO14443-4 / DEP flags).
    pub mode: u8,
    /// First frame received from the initiator.
    pub initiator_command: Vec<u8>,
}
