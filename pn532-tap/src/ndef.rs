// pn532-tap/src/ndef.rs

//! NDEF Text record and the Type 4 TLV wrapper served by the card
//! emulation session.

use crate::error::ProtocolError;
use crate::Result;

/// MB | ME | SR, TNF = well-known
const HEADER_SHORT: u8 = 0xD1;
/// MB | ME, TNF = well-known (4-byte payload length)
const HEADER_LONG: u8 = 0xC1;
const TYPE_TEXT: u8 = b'T';
/// UTF-8 status byte with a 2 byte language code
const TEXT_STATUS: u8 = 0x02;
const LANGUAGE: &[u8; 2] = b"en";

pub const TLV_NDEF_MESSAGE: u8 = 0x03;
pub const TLV_TERMINATOR: u8 = 0xFE;
/// Longest value the 3-byte TLV length form can describe.
pub const TLV_MAX_LEN: usize = 0xFFFE;

/// Single-record NDEF message carrying `text` as a Text record (`en`).
pub fn text_record(text: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(1 + LANGUAGE.len() + text.len());
    payload.push(TEXT_STATUS);
    payload.extend_from_slice(LANGUAGE);
    payload.extend_from_slice(text.as_bytes());

    let mut record = Vec::with_capacity(payload.len() + 7);
    if payload.len() <= u8::MAX as usize {
        record.push(HEADER_SHORT);
        record.push(0x01);
        record.push(payload.len() as u8);
    } else {
        record.push(HEADER_LONG);
        record.push(0x01);
        record.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    }
    record.push(TYPE_TEXT);
    record.extend_from_slice(&payload);
    record
}

/// Wrap an NDEF message into an NDEF Message TLV followed by the
/// terminator TLV.
pub fn wrap_tlv(message: &[u8]) -> Result<Vec<u8>> {
    if message.len() > TLV_MAX_LEN {
        return Err(ProtocolError::PayloadTooLarge {
            max: TLV_MAX_LEN,
            actual: message.len(),
        }
        .into());
    }

    let mut out = Vec::with_capacity(message.len() + 5);
    out.push(TLV_NDEF_MESSAGE);
    if message.len() < 0xFF {
        out.push(message.len() as u8);
    } else {
        out.push(0xFF);
        out.extend_from_slice(&(message.len() as u16).to_be_bytes());
    }
    out.extend_from_slice(message);
    out.push(TLV_TERMINATOR);
    Ok(out)
}

/// The bytes served by READ BINARY for `text`.
pub fn text_message(text: &str) -> Result<Vec<u8>> {
    wrap_tlv(&text_record(text))
}
