//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the scripted-chip setup (ACK + response frames,
//! init handshake, connectors handing out mock links) so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

use crate::constants::{PN532_ACK, PN532_TFI_DEVICE};
use crate::device::{self, Timings};
use crate::protocol::Frame;
use crate::transport::{Connector, MockTransport, Transport};
use crate::{CancellationToken, Error, Result};

/// Chip -> host information frame carrying `payload` (response code first).
#[doc(hidden)]
pub fn device_frame(payload: &[u8]) -> Vec<u8> {
    let len = (payload.len() + 1) as u8;
    let mut out = vec![0x00, 0x00, 0xFF, len, len.wrapping_neg(), PN532_TFI_DEVICE];
    out.extend_from_slice(payload);
    out.push(crate::protocol::dcs(PN532_TFI_DEVICE, payload));
    out.push(0x00);
    debug_assert!(Frame::decode(&out).is_ok());
    out
}

/// ACK followed by the response frame, as the chip answers a command.
#[doc(hidden)]
pub fn reply(payload: &[u8]) -> Vec<u8> {
    let mut out = PN532_ACK.to_vec();
    out.extend(device_frame(payload));
    out
}

/// Replies to the init handshake: firmware 1.6 of a PN532, then SAM OK.
#[doc(hidden)]
pub fn ready_replies() -> Vec<Vec<u8>> {
    vec![reply(&[0x03, 0x32, 0x01, 0x06, 0x07]), reply(&[0x15])]
}

/// Timings suitable for the mock: no stabilization delay, short waits.
#[doc(hidden)]
pub fn fast_timings() -> Timings {
    Timings {
        stabilize_ms: 0,
        ack_timeout_ms: 20,
        response_timeout_ms: 20,
        poll_timeout_ms: 20,
        target_timeout_ms: 20,
        data_timeout_ms: 20,
    }
}

/// MockTransport seeded with the init handshake followed by `frames`.
#[doc(hidden)]
pub fn scripted_chip(frames: Vec<Vec<u8>>) -> Rc<RefCell<MockTransport>> {
    let mut mock = MockTransport::new();
    for r in ready_replies().into_iter().chain(frames) {
        mock.push_reply(r);
    }
    mock.shared()
}

/// Convenience: an initialized controller over `chip`.
#[doc(hidden)]
pub fn initialized_controller(
    chip: &Rc<RefCell<MockTransport>>,
    token: CancellationToken,
) -> Result<device::TargetController<device::Initialized>> {
    device::TargetController::new(Box::new(chip.clone()), token)
        .with_timings(fast_timings())
        .initialize()
}

/// Connector that hands out scripted links in order; `Err(())` entries
/// fail to open like a missing serial port. Clones share the script.
#[doc(hidden)]
#[derive(Clone)]
pub struct ScriptedConnector {
    script: Rc<RefCell<VecDeque<std::result::Result<Rc<RefCell<MockTransport>>, ()>>>>,
    attempts: Rc<Cell<usize>>,
}

impl ScriptedConnector {
    pub fn new(script: Vec<std::result::Result<Rc<RefCell<MockTransport>>, ()>>) -> Self {
        Self {
            script: Rc::new(RefCell::new(script.into())),
            attempts: Rc::new(Cell::new(0)),
        }
    }

    /// `n` failing opens.
    pub fn failing(n: usize) -> Self {
        Self::new(vec![Err(()); n])
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl Connector for ScriptedConnector {
    fn describe(&self) -> String {
        "/dev/ttyMOCK".to_string()
    }

    fn connect(&mut self) -> Result<Box<dyn Transport>> {
        self.attempts.set(self.attempts.get() + 1);
        match self.script.borrow_mut().pop_front() {
            Some(Ok(chip)) => Ok(Box::new(chip)),
            Some(Err(())) | None => Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no such device: /dev/ttyMOCK",
            ))),
        }
    }
}

/// Cloneable in-memory IPC sink.
#[doc(hidden)]
#[derive(Clone, Default)]
pub struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Every emitted line parsed as JSON.
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.text()
            .lines()
            .filter_map(|l| serde_json::from_str(l).ok())
            .collect()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
