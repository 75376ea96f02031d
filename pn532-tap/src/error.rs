// pn532-tap/src/error.rs

use thiserror::Error;

/// Failures of the PN532 wire protocol. All of them are recoverable: the
/// supervisor tears the link down and reconnects after a backoff.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("payload too large: at most {max} bytes fit in a frame, got {actual}")]
    PayloadTooLarge { max: usize, actual: usize },

    #[error("malformed frame: {0}")]
    Malformed(String),

    #[error("incomplete frame: expected {expected} bytes, got {actual}")]
    Incomplete { expected: usize, actual: usize },

    #[error("no ACK received from chip")]
    NoAck,

    #[error("no response received from chip")]
    NoResponse,

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    #[error("invalid response length: expected at least {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("chip reported an application error frame")]
    ChipError,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("serial i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("ipc write failed: {0}")]
    Ipc(std::io::Error),

    #[error("unexpected error: {0}")]
    Unexpected(String),

    #[error("operation cancelled")]
    Cancelled,
}

/// Closed classification of [`Error`] used by the supervisor to decide
/// between retrying, stopping cleanly and giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ErrorKind {
    #[display(fmt = "Config")]
    Config,
    #[display(fmt = "Serial")]
    Transport,
    #[display(fmt = "PN532")]
    Protocol,
    #[display(fmt = "Unexpected")]
    Unexpected,
    #[display(fmt = "Cancelled")]
    Cancelled,
}

impl ErrorKind {
    /// Transport and protocol failures trigger backoff and reconnection.
    pub fn is_recoverable(self) -> bool {
        matches!(self, Self::Transport | Self::Protocol)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Transport,
            #[cfg(feature = "serial")]
            Self::Serial(_) => ErrorKind::Transport,
            Self::Protocol(_) => ErrorKind::Protocol,
            Self::Ipc(_) | Self::Unexpected(_) => ErrorKind::Unexpected,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind().is_recoverable()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
