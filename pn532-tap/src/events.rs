// pn532-tap/src/events.rs

//! JSON-lines IPC towards the parent process. One event per line on the
//! sink (stdout in production), flushed immediately. Diagnostics never go
//! here; they are logged to stderr.

use std::io::{self, Stdout, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use log::error;
use serde::Serialize;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Event {
    Ready { firmware: String, port: String },
    Tap { uid: String },
    Heartbeat,
    Shutdown { reason: String },
    Error { message: String, fatal: bool },
}

impl Event {
    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(flatten)]
    event: &'a Event,
    timestamp: u64,
}

/// Seconds since the Unix epoch.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub struct EventEmitter<W: Write> {
    sink: W,
    wall_clock: fn() -> u64,
}

impl EventEmitter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> EventEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            wall_clock: unix_timestamp,
        }
    }

    /// Replace the timestamp source (tests pin it to a constant).
    pub fn with_wall_clock(mut self, wall_clock: fn() -> u64) -> Self {
        self.wall_clock = wall_clock;
        self
    }

    /// Write `event` as one JSON line and flush. A failing sink means the
    /// parent is gone and is reported as [`Error::Ipc`].
    pub fn emit(&mut self, event: &Event) -> Result<()> {
        let envelope = Envelope {
            event,
            timestamp: (self.wall_clock)(),
        };
        let line = serde_json::to_string(&envelope)
            .map_err(|e| Error::Unexpected(format!("event serialization failed: {}", e)))?;
        writeln!(self.sink, "{}", line).map_err(Error::Ipc)?;
        self.sink.flush().map_err(Error::Ipc)
    }

    /// Best-effort fatal `error` event on the way out. A sink failure is
    /// logged; returns whether the event was delivered.
    pub fn report_fatal(&mut self, message: impl Into<String>) -> bool {
        match self.emit(&Event::error(message, true)) {
            Ok(()) => true,
            Err(e) => {
                error!("cannot report fatal error: {}", e);
                false
            }
        }
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
