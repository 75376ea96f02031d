// pn532-tap/src/protocol/commands/mod.rs

pub mod target;

pub use target::{encode_init_as_target, TargetParams};

use crate::constants::*;
use crate::protocol::Frame;
use crate::Result;

/// SAM operating mode (SAMConfiguration first parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamMode {
    Normal = 0x01,
    VirtualCard = 0x02,
    WiredCard = 0x03,
    DualCard = 0x04,
}

/// Baud rate / modulation selector for InListPassiveTarget
pub const BRTY_106K_TYPE_A: u8 = 0x00;

/// High-level Command enum. Only the commands needed for firmware query,
/// SAM setup, passive polling and target emulation are modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetFirmwareVersion,
    SamConfiguration {
        mode: SamMode,
        /// Virtual card timeout in units of 50 ms
        timeout: u8,
        use_irq: bool,
    },
    InListPassiveTarget {
        max_targets: u8,
        brty: u8,
    },
    TgInitAsTarget(TargetParams),
    TgGetData,
    TgSetData(Vec<u8>),
}

impl Command {
    /// SAM configuration used at start-up: normal mode, 1 s timeout, IRQ on.
    pub fn sam_normal() -> Self {
        Self::SamConfiguration {
            mode: SamMode::Normal,
            timeout: 0x14,
            use_irq: true,
        }
    }

    /// Poll for a single ISO14443A target at 106 kbps.
    pub fn inlist_one_iso_a() -> Self {
        Self::InListPassiveTarget {
            max_targets: 1,
            brty: BRTY_106K_TYPE_A,
        }
    }

    /// Return the PN532 command code.
    pub fn opcode(&self) -> u8 {
        match self {
            Self::GetFirmwareVersion => PN532_CMD_GET_FIRMWARE_VERSION,
            Self::SamConfiguration { .. } => PN532_CMD_SAM_CONFIGURATION,
            Self::InListPassiveTarget { .. } => PN532_CMD_INLIST_PASSIVE_TARGET,
            Self::TgInitAsTarget(_) => PN532_CMD_TG_INIT_AS_TARGET,
            Self::TgGetData => PN532_CMD_TG_GET_DATA,
            Self::TgSetData(_) => PN532_CMD_TG_SET_DATA,
        }
    }

    /// Response code the chip answers with (command code + 1).
    pub fn response_code(&self) -> u8 {
        self.opcode().wrapping_add(1)
    }

    /// Encode the parameter bytes that follow the command code.
    pub fn params(&self) -> Vec<u8> {
        match self {
            Self::GetFirmwareVersion | Self::TgGetData => Vec::new(),
            Self::SamConfiguration {
                mode,
                timeout,
                use_irq,
            } => vec![*mode as u8, *timeout, u8::from(*use_irq)],
            Self::InListPassiveTarget { max_targets, brty } => vec![*max_targets, *brty],
            Self::TgInitAsTarget(params) => encode_init_as_target(params),
            Self::TgSetData(data) => data.clone(),
        }
    }

    /// Encode the command into a full wire frame.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Frame::encode(self.opcode(), &self.params())
    }
}
