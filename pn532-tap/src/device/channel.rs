// pn532-tap/src/device/channel.rs

use std::time::Instant;

use log::{debug, trace};

use crate::cancel::CancellationToken;
use crate::constants::{PN532_ACK, PN532_HSU_WAKEUP};
use crate::error::ProtocolError;
use crate::protocol::{codec, find_ack, Command, Frame, Response};
use crate::transport::Transport;
use crate::utils::{bytes_to_hex_spaced, ms, READ_SLICE_MS};
use crate::{Error, Result};

/// Request/response exchange with the chip over a [`Transport`]: write a
/// command frame, wait for the ACK, then wait for and decode the response
/// frame. Reads are sliced so cancellation is noticed between slices.
pub struct CommandChannel {
    transport: Box<dyn Transport>,
    token: CancellationToken,
    rx: Vec<u8>,
}

impl CommandChannel {
    pub fn new(transport: Box<dyn Transport>, token: CancellationToken) -> Self {
        Self {
            transport,
            token,
            rx: Vec::with_capacity(64),
        }
    }

    pub fn transport_mut(&mut self) -> &mut dyn Transport {
        &mut *self.transport
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Run one command. Fails with `NoAck` when no ACK arrives within
    /// `ack_timeout_ms`, and with `NoResponse` / `Incomplete` when the
    /// response frame is missing or cut short after `response_timeout_ms`.
    pub fn execute(
        &mut self,
        cmd: &Command,
        ack_timeout_ms: u64,
        response_timeout_ms: u64,
    ) -> Result<Response> {
        self.token.check()?;
        let frame = codec::encode_command_frame(cmd)?;

        self.transport.clear_input()?;
        self.rx.clear();
        debug!("> {}", bytes_to_hex_spaced(&frame));
        self.transport.write(&frame)?;

        self.wait_for_ack(ack_timeout_ms)?;
        let response = self.wait_for_frame(response_timeout_ms)?;
        debug!("< {}", bytes_to_hex_spaced(&response.to_bytes()));
        codec::parse_response(cmd, &response)
    }

    /// Send an ACK frame, which makes the chip drop a pending command.
    pub fn abort(&mut self) -> Result<()> {
        trace!("> ACK (abort)");
        self.transport.write(&PN532_ACK)
    }

    /// HSU wake-up preamble; required once after power-on.
    pub fn wake_up(&mut self) -> Result<()> {
        trace!("> wake-up");
        self.transport.write(&PN532_HSU_WAKEUP)
    }

    pub fn close(mut self) -> Result<()> {
        self.transport.close()
    }

    fn wait_for_ack(&mut self, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + ms(timeout_ms);
        loop {
            if let Some(end) = find_ack(&self.rx) {
                self.rx.drain(..end);
                return Ok(());
            }
            if !self.fill(deadline)? {
                if !self.rx.is_empty() {
                    debug!("no ACK in: {}", bytes_to_hex_spaced(&self.rx));
                }
                return Err(ProtocolError::NoAck.into());
            }
        }
    }

    fn wait_for_frame(&mut self, timeout_ms: u64) -> Result<Frame> {
        let deadline = Instant::now() + ms(timeout_ms);
        loop {
            let pending = match Frame::decode_prefix(&self.rx) {
                Ok((frame, consumed)) => {
                    self.rx.drain(..consumed);
                    return Ok(frame);
                }
                Err(Error::Protocol(
                    e @ (ProtocolError::NoResponse | ProtocolError::Incomplete { .. }),
                )) => e,
                Err(e) => return Err(e),
            };
            if !self.fill(deadline)? {
                return Err(pending.into());
            }
        }
    }

    /// Read one slice into the receive buffer. Returns `false` once the
    /// deadline has passed.
    fn fill(&mut self, deadline: Instant) -> Result<bool> {
        self.token.check()?;
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        let remaining = (deadline - now).as_millis() as u64;
        let slice = remaining.clamp(1, READ_SLICE_MS);

        let mut chunk = [0u8; 64];
        let n = self.transport.read(&mut chunk, slice)?;
        if n > 0 {
            trace!("rx {}", bytes_to_hex_spaced(&chunk[..n]));
            self.rx.extend_from_slice(&chunk[..n]);
        }
        Ok(true)
    }
}
