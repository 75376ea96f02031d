// pn532-tap/src/protocol/responses/mod.rs

use crate::constants::*;
use crate::error::ProtocolError;
use crate::protocol::parser::{byte_at, expect_response_code, slice_at};
use crate::types::{FirmwareVersion, InitiatorInfo, PassiveTarget, Uid};
use crate::Result;

/// SEL_RES bit announcing ISO14443-4 compliance (an ATS follows the UID).
const SEL_RES_ISO14443_4: u8 = 0x20;

/// High-level Response enum. The payload handed to `decode` still carries
/// the response code as its first byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    FirmwareVersion(FirmwareVersion),
    SamConfiguration,
    InListPassiveTarget { targets: Vec<PassiveTarget> },
    TgInitAsTarget(InitiatorInfo),
    TgGetData { status: u8, data: Vec<u8> },
    TgSetData { status: u8 },
}

impl Response {
    /// Decode a response payload for the command identified by `opcode`.
    pub fn decode(opcode: u8, data: &[u8]) -> Result<Self> {
        expect_response_code(data, opcode.wrapping_add(1))?;
        let body = &data[1..];

        match opcode {
            PN532_CMD_GET_FIRMWARE_VERSION => {
                let b = slice_at(body, 0, 4)?;
                Ok(Self::FirmwareVersion(FirmwareVersion {
                    ic: b[0],
                    version: b[1],
                    revision: b[2],
                    support: b[3],
                }))
            }
            PN532_CMD_SAM_CONFIGURATION => Ok(Self::SamConfiguration),
            PN532_CMD_INLIST_PASSIVE_TARGET => Ok(Self::InListPassiveTarget {
                targets: decode_iso_a_targets(body)?,
            }),
            PN532_CMD_TG_INIT_AS_TARGET => {
                let mode = byte_at(body, 0)?;
                Ok(Self::TgInitAsTarget(InitiatorInfo {
                    mode,
                    initiator_command: body[1..].to_vec(),
                }))
            }
            PN532_CMD_TG_GET_DATA => {
                let status = byte_at(body, 0)?;
                Ok(Self::TgGetData {
                    status,
                    data: body[1..].to_vec(),
                })
            }
            PN532_CMD_TG_SET_DATA => Ok(Self::TgSetData {
                status: byte_at(body, 0)?,
            }),
            other => Err(ProtocolError::Malformed(format!(
                "no decoder for command {:#04x}",
                other
            ))
            .into()),
        }
    }
}

/// Parse the target list of an InListPassiveTarget reply for 106 kbps
/// type A: NbTg, then per target Tg, SENS_RES(2), SEL_RES, NFCIDLength,
/// NFCID1, and an ATS (length-prefixed) for ISO14443-4 targets.
fn decode_iso_a_targets(body: &[u8]) -> Result<Vec<PassiveTarget>> {
    let count = byte_at(body, 0)? as usize;
    let mut targets = Vec::with_capacity(count);
    let mut pos = 1usize;

    for _ in 0..count {
        let header = slice_at(body, pos, 5)?;
        let tg = header[0];
        let sens_res = [header[1], header[2]];
        let sel_res = header[3];
        let uid_len = header[4] as usize;
        pos += 5;

        if uid_len == 0 {
            return Err(ProtocolError::InvalidLength {
                expected: 1,
                actual: 0,
            }
            .into());
        }
        let uid = Uid::from_bytes(slice_at(body, pos, uid_len)?.to_vec());
        pos += uid_len;

        let mut ats = Vec::new();
        if sel_res & SEL_RES_ISO14443_4 != 0 && pos < body.len() {
            // ATS length byte counts itself
            let ats_len = (byte_at(body, pos)? as usize).max(1);
            ats = slice_at(body, pos, ats_len)?.to_vec();
            pos += ats_len;
        }

        targets.push(PassiveTarget {
            tg,
            sens_res,
            sel_res,
            uid,
            ats,
        });
    }

    Ok(targets)
}
