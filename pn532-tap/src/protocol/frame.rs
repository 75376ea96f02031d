// pn532-tap/src/protocol/frame.rs

use crate::constants::{
    PN532_ACK, PN532_ERROR_FRAME, PN532_MAX_FRAME_DATA, PN532_POSTAMBLE, PN532_PREAMBLE,
    PN532_TFI_HOST,
};
use crate::error::ProtocolError;
use crate::protocol::checksum::{dcs, lcs};
use crate::Result;

/// PN532 normal information frame.
/// Format: [Preamble(3)] [Len(1)] [LCS(1)] [TFI(1)] [Payload(n)] [DCS(1)] [Postamble(1)]
/// Preamble: 0x00 0x00 0xFF
/// Postamble: 0x00
/// `Len` counts the TFI byte plus the payload; the payload starts with
/// the command (or response) code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    tfi: u8,
    payload: Vec<u8>,
}

impl Frame {
    /// Largest payload (command code + parameters) a normal frame can carry.
    pub const MAX_PAYLOAD_LEN: usize = PN532_MAX_FRAME_DATA - 1;

    pub fn new(tfi: u8, payload: Vec<u8>) -> Result<Self> {
        if payload.len() > Self::MAX_PAYLOAD_LEN {
            return Err(ProtocolError::PayloadTooLarge {
                max: Self::MAX_PAYLOAD_LEN,
                actual: payload.len(),
            }
            .into());
        }
        Ok(Self { tfi, payload })
    }

    /// Build a host -> chip frame for `opcode` with `params`.
    pub fn command(opcode: u8, params: &[u8]) -> Result<Self> {
        let mut payload = Vec::with_capacity(1 + params.len());
        payload.push(opcode);
        payload.extend_from_slice(params);
        Self::new(PN532_TFI_HOST, payload)
    }

    /// Encode a command straight to wire bytes.
    pub fn encode(opcode: u8, params: &[u8]) -> Result<Vec<u8>> {
        Ok(Self::command(opcode, params)?.to_bytes())
    }

    pub fn tfi(&self) -> u8 {
        self.tfi
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serialize the frame including preamble, checksums and postamble.
    pub fn to_bytes(&self) -> Vec<u8> {
        // new() guarantees payload.len() + 1 <= 255
        let len = (self.payload.len() + 1) as u8;
        let mut out = Vec::with_capacity(self.payload.len() + 8);
        out.extend_from_slice(&PN532_PREAMBLE);
        out.push(len);
        out.push(lcs(len));
        out.push(self.tfi);
        out.extend_from_slice(&self.payload);
        out.push(dcs(self.tfi, &self.payload));
        out.push(PN532_POSTAMBLE);
        out
    }

    /// Decode the first information frame found in `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_prefix(bytes).map(|(frame, _)| frame)
    }

    /// Decode the first information frame found in `bytes` and return it
    /// together with the offset just past its postamble. Leading noise and
    /// ACK frames are skipped.
    pub fn decode_prefix(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut start = 0usize;
        loop {
            let pos = match find_preamble(&bytes[start..]) {
                Some(rel) => start + rel,
                None => return Err(ProtocolError::NoResponse.into()),
            };
            let rest = &bytes[pos..];
            if rest.len() < 5 {
                return Err(ProtocolError::Incomplete {
                    expected: 5,
                    actual: rest.len(),
                }
                .into());
            }

            let len = rest[3];
            let lcs_actual = rest[4];

            // ACK frames may precede the response in the same buffer.
            if len == 0x00 && lcs_actual == 0xFF {
                start = (pos + PN532_ACK.len()).min(bytes.len());
                continue;
            }

            if len.wrapping_add(lcs_actual) != 0 {
                return Err(ProtocolError::Malformed(format!(
                    "length checksum mismatch: len={:#04x}, lcs={:#04x}",
                    len, lcs_actual
                ))
                .into());
            }

            if rest.starts_with(&PN532_ERROR_FRAME) {
                return Err(ProtocolError::ChipError.into());
            }

            let total = 5 + len as usize + 2;
            if rest.len() < total {
                return Err(ProtocolError::Incomplete {
                    expected: total,
                    actual: rest.len(),
                }
                .into());
            }

            if len == 0 {
                return Err(ProtocolError::Malformed("empty frame body".into()).into());
            }

            let data_end = 5 + len as usize;
            let tfi = rest[5];
            let payload = &rest[6..data_end];
            let dcs_actual = rest[data_end];
            let dcs_expected = dcs(tfi, payload);
            if dcs_actual != dcs_expected {
                return Err(ProtocolError::Malformed(format!(
                    "data checksum mismatch: expected {:#04x}, got {:#04x}",
                    dcs_expected, dcs_actual
                ))
                .into());
            }

            if rest[data_end + 1] != PN532_POSTAMBLE {
                return Err(ProtocolError::Malformed("invalid postamble".into()).into());
            }

            let frame = Self {
                tfi,
                payload: payload.to_vec(),
            };
            return Ok((frame, pos + total));
        }
    }
}

/// Exact match against the 6-byte ACK frame.
pub fn is_ack(bytes: &[u8]) -> bool {
    bytes == PN532_ACK
}

/// Offset just past the first ACK frame contained in `bytes`.
pub fn find_ack(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(PN532_ACK.len())
        .position(|w| w == PN532_ACK)
        .map(|pos| pos + PN532_ACK.len())
}

fn find_preamble(bytes: &[u8]) -> Option<usize> {
    bytes.windows(PN532_PREAMBLE.len()).position(|w| w == PN532_PREAMBLE)
}
