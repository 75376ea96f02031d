// pn532-tap/src/device/controller.rs

use log::{debug, info};

use crate::cancel::CancellationToken;
use crate::device::channel::CommandChannel;
use crate::error::ProtocolError;
use crate::protocol::{Command, Response, TargetParams};
use crate::transport::Transport;
use crate::types::{FirmwareVersion, InitiatorInfo, Uid};
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized {
    firmware: FirmwareVersion,
}

/// Per-step timeouts of the controller, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timings {
    /// Pause after dropping DTR/RTS before the chip is addressed
    pub stabilize_ms: u64,
    pub ack_timeout_ms: u64,
    /// Response timeout of the setup commands (firmware, SAM)
    pub response_timeout_ms: u64,
    /// Suggested wait of one InListPassiveTarget
    pub poll_timeout_ms: u64,
    /// Suggested wait of one TgInitAsTarget
    pub target_timeout_ms: u64,
    /// Suggested TgGetData / TgSetData timeout
    pub data_timeout_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            stabilize_ms: 200,
            ack_timeout_ms: 200,
            response_timeout_ms: 1000,
            poll_timeout_ms: 500,
            target_timeout_ms: 1000,
            data_timeout_ms: 2000,
        }
    }
}

/// PN532 handle that enforces initialization state at compile time.
pub struct TargetController<State = Uninitialized> {
    channel: CommandChannel,
    timings: Timings,
    state: State,
}

impl TargetController<Uninitialized> {
    pub fn new(transport: Box<dyn Transport>, token: CancellationToken) -> Self {
        Self {
            channel: CommandChannel::new(transport, token),
            timings: Timings::default(),
            state: Uninitialized,
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Reset the control lines, wake the chip, read its firmware version
    /// and switch the SAM to normal mode. The transport is closed when any
    /// step fails.
    pub fn initialize(mut self) -> Result<TargetController<Initialized>> {
        match self.handshake() {
            Ok(firmware) => {
                info!(
                    "PN532 firmware {} (IC {:#04x}, support {:#04x})",
                    firmware, firmware.ic, firmware.support
                );
                Ok(TargetController {
                    channel: self.channel,
                    timings: self.timings,
                    state: Initialized { firmware },
                })
            }
            Err(e) => {
                if let Err(close_err) = self.channel.close() {
                    debug!("close after failed init: {}", close_err);
                }
                Err(e)
            }
        }
    }

    fn handshake(&mut self) -> Result<FirmwareVersion> {
        // DTR/RTS low; some adapters hold the chip in reset otherwise.
        self.channel.transport_mut().set_control_lines(false, false)?;
        if self.timings.stabilize_ms > 0 {
            std::thread::sleep(crate::utils::ms(self.timings.stabilize_ms));
        }
        self.channel.token().check()?;
        self.channel.wake_up()?;

        let t = &self.timings;
        let firmware = match self.channel.execute(
            &Command::GetFirmwareVersion,
            t.ack_timeout_ms,
            t.response_timeout_ms,
        )? {
            Response::FirmwareVersion(fw) => fw,
            other => return Err(mismatch("GetFirmwareVersion", &other)),
        };

        match self.channel.execute(
            &Command::sam_normal(),
            t.ack_timeout_ms,
            t.response_timeout_ms,
        )? {
            Response::SamConfiguration => Ok(firmware),
            other => Err(mismatch("SAMConfiguration", &other)),
        }
    }
}

impl TargetController<Initialized> {
    pub fn firmware(&self) -> FirmwareVersion {
        self.state.firmware
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Look for one ISO14443A tag. `None` when nothing answered within the
    /// poll timeout; the pending command is aborted in that case.
    pub fn poll_passive_target(&mut self, timeout_ms: u64) -> Result<Option<Uid>> {
        match self.exchange(&Command::inlist_one_iso_a(), timeout_ms)? {
            Some(Response::InListPassiveTarget { targets }) => {
                Ok(targets.into_iter().next().map(|t| t.uid))
            }
            Some(other) => Err(mismatch("InListPassiveTarget", &other)),
            None => Ok(None),
        }
    }

    /// Present the chip as a Type 4 tag and wait for an initiator.
    pub fn init_target(&mut self, timeout_ms: u64) -> Result<Option<InitiatorInfo>> {
        let cmd = Command::TgInitAsTarget(TargetParams::default());
        match self.exchange(&cmd, timeout_ms)? {
            Some(Response::TgInitAsTarget(info)) => Ok(Some(info)),
            Some(other) => Err(mismatch("TgInitAsTarget", &other)),
            None => Ok(None),
        }
    }

    /// Next APDU from the initiator with the status byte stripped. `None`
    /// when the initiator went away (non-zero status) or stayed silent.
    pub fn get_data(&mut self, timeout_ms: u64) -> Result<Option<Vec<u8>>> {
        match self.exchange(&Command::TgGetData, timeout_ms)? {
            Some(Response::TgGetData { status: 0, data }) => Ok(Some(data)),
            Some(Response::TgGetData { status, .. }) => {
                debug!("TgGetData status {:#04x}", status);
                Ok(None)
            }
            Some(other) => Err(mismatch("TgGetData", &other)),
            None => Ok(None),
        }
    }

    /// Send a response APDU. Returns `false` when the chip reports a
    /// non-zero status (initiator released the link).
    pub fn set_data(&mut self, data: &[u8], timeout_ms: u64) -> Result<bool> {
        match self.exchange(&Command::TgSetData(data.to_vec()), timeout_ms)? {
            Some(Response::TgSetData { status: 0 }) => Ok(true),
            Some(Response::TgSetData { status }) => {
                debug!("TgSetData status {:#04x}", status);
                Ok(false)
            }
            Some(other) => Err(mismatch("TgSetData", &other)),
            None => Ok(false),
        }
    }

    pub fn close(self) -> Result<()> {
        self.channel.close()
    }

    /// Execute `cmd`, mapping a response timeout after a successful ACK to
    /// `None` and aborting the command the chip is still working on.
    fn exchange(&mut self, cmd: &Command, response_timeout_ms: u64) -> Result<Option<Response>> {
        match self
            .channel
            .execute(cmd, self.timings.ack_timeout_ms, response_timeout_ms)
        {
            Ok(resp) => Ok(Some(resp)),
            Err(Error::Protocol(ProtocolError::NoResponse)) => {
                self.channel.abort()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn mismatch(command: &str, response: &Response) -> Error {
    ProtocolError::Malformed(format!("{} answered with {:?}", command, response)).into()
}
