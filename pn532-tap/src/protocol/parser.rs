// pn532-tap/src/protocol/parser.rs

use crate::error::ProtocolError;
use crate::Result;

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(ProtocolError::InvalidLength {
            expected: min,
            actual: data.len(),
        }
        .into());
    }
    Ok(())
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Ensure the first byte (response code) equals `expected`. Returns
/// UnexpectedResponse on mismatch and InvalidLength on an empty slice.
pub fn expect_response_code(data: &[u8], expected: u8) -> Result<()> {
    let actual = byte_at(data, 0)?;
    if actual != expected {
        return Err(ProtocolError::UnexpectedResponse { expected, actual }.into());
    }
    Ok(())
}
