// pn532-tap/src/protocol/codec.rs

use crate::constants::PN532_TFI_DEVICE;
use crate::error::ProtocolError;
use crate::Result;

use super::commands::Command;
use super::responses::Response;
use super::Frame;

/// Encode a Command into a full wire frame (with preamble/LCS/DCS/postamble).
pub fn encode_command_frame(cmd: &Command) -> Result<Vec<u8>> {
    cmd.encode()
}

/// Parse an already decoded chip -> host frame as the response to `cmd`.
pub fn parse_response(cmd: &Command, frame: &Frame) -> Result<Response> {
    if frame.tfi() != PN532_TFI_DEVICE {
        return Err(ProtocolError::Malformed(format!(
            "unexpected frame identifier {:#04x}",
            frame.tfi()
        ))
        .into());
    }
    Response::decode(cmd.opcode(), frame.payload())
}

/// Decode a full wire frame and parse the contained response for the
/// command that was sent.
pub fn decode_response_frame(cmd: &Command, bytes: &[u8]) -> Result<Response> {
    let frame = Frame::decode(bytes)?;
    parse_response(cmd, &frame)
}
