// pn532-tap/src/emulation/session.rs

use log::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::constants::{INS_READ_BINARY, INS_SELECT, SW_NOT_FOUND, SW_OK};
use crate::device::{Initialized, TargetController};
use crate::emulation::apdu::Apdu;
use crate::types::InitiatorInfo;
use crate::utils::bytes_to_hex_spaced;
use crate::{ErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionState {
    AwaitInit,
    #[display(fmt = "SessionActive")]
    Active,
    Closed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub apdus: usize,
    pub bytes_served: usize,
}

/// One initiator activation of the emulated tag, serving `payload`
/// through READ BINARY in `chunk_size` pieces.
pub struct CardEmulationSession<'a> {
    payload: &'a [u8],
    chunk_size: usize,
    offset: usize,
    state: SessionState,
    summary: SessionSummary,
}

impl<'a> CardEmulationSession<'a> {
    pub fn new(payload: &'a [u8], chunk_size: usize) -> Self {
        Self {
            payload,
            chunk_size: chunk_size.max(1),
            offset: 0,
            state: SessionState::AwaitInit,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Mark the session active after `init_target` reported an initiator.
    pub fn activate(&mut self, initiator: &InitiatorInfo) {
        debug!(
            "initiator activated: mode {:#04x}, command {}",
            initiator.mode,
            bytes_to_hex_spaced(&initiator.initiator_command)
        );
        self.state = SessionState::Active;
    }

    /// Response APDU for one command APDU.
    pub fn respond(&mut self, raw: &[u8]) -> Vec<u8> {
        self.summary.apdus += 1;
        let Some(apdu) = Apdu::parse(raw) else {
            return SW_NOT_FOUND.to_vec();
        };
        match apdu.ins {
            INS_SELECT => SW_OK.to_vec(),
            INS_READ_BINARY => {
                let remaining = self.payload.len().saturating_sub(self.offset);
                let mut len = self.chunk_size.min(remaining);
                if let Some(le) = apdu.expected_len() {
                    len = len.min(le);
                }
                let chunk = &self.payload[self.offset..self.offset + len];
                self.offset += len;
                self.summary.bytes_served += len;

                let mut out = Vec::with_capacity(len + 2);
                out.extend_from_slice(chunk);
                out.extend_from_slice(&SW_OK);
                out
            }
            _ => SW_NOT_FOUND.to_vec(),
        }
    }

    /// Serve APDUs until the initiator leaves. `on_turn` runs before every
    /// exchange (heartbeat hook). Protocol failures end the session;
    /// transport errors and cancellation are returned.
    pub fn run<F>(
        &mut self,
        controller: &mut TargetController<Initialized>,
        token: &CancellationToken,
        mut on_turn: F,
    ) -> Result<SessionSummary>
    where
        F: FnMut() -> Result<()>,
    {
        if self.state == SessionState::AwaitInit {
            self.state = SessionState::Active;
        }

        let result = self.serve(controller, token, &mut on_turn);
        self.state = SessionState::Closed;
        result?;

        info!(
            "emulation session closed: {} APDUs, {} bytes served",
            self.summary.apdus, self.summary.bytes_served
        );
        Ok(self.summary)
    }

    fn serve<F>(
        &mut self,
        controller: &mut TargetController<Initialized>,
        token: &CancellationToken,
        on_turn: &mut F,
    ) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        while self.state == SessionState::Active {
            token.check()?;
            on_turn()?;

            let timeout = controller.timings().data_timeout_ms;
            let command = match controller.get_data(timeout) {
                Ok(Some(command)) => command,
                Ok(None) => {
                    debug!("initiator released the link");
                    break;
                }
                Err(e) if e.kind() == ErrorKind::Protocol => {
                    warn!("emulation receive failed: {}", e);
                    break;
                }
                Err(e) => return Err(e),
            };

            debug!("APDU < {}", bytes_to_hex_spaced(&command));
            let response = self.respond(&command);
            debug!("APDU > {}", bytes_to_hex_spaced(&response));

            match controller.set_data(&response, timeout) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.kind() == ErrorKind::Protocol => {
                    warn!("emulation send failed: {}", e);
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
