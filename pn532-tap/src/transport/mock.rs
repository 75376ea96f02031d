// pn532-tap/src/transport/mock.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::cancel::CancellationToken;
use crate::constants::{PN532_ACK, PN532_PREAMBLE};
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It behaves like a scripted chip: every
/// command frame written releases the next queued reply into the receive
/// buffer. ACK (abort) and wake-up writes are recorded but release nothing.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8>>,
    pub replies: VecDeque<Vec<u8>>,
    pub rx: VecDeque<u8>,
    /// Record of `set_control_lines` calls: (dtr, rts)
    pub control_lines: Vec<(bool, bool)>,
    /// Testing hook: number of subsequent writes that should fail
    pub write_failures: usize,
    pub clear_count: usize,
    pub closed: bool,
    /// Cancelled once every reply has been consumed and read, so loops
    /// driven by this transport stop on their own.
    pub cancel_when_drained: Option<CancellationToken>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&mut self, reply: Vec<u8>) {
        self.replies.push_back(reply);
    }

    /// Bytes that arrive without any command being written (line noise,
    /// a stale response).
    pub fn push_unsolicited(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    pub fn set_write_failures(&mut self, n: usize) {
        self.write_failures = n;
    }

    pub fn cancel_when_drained(&mut self, token: CancellationToken) {
        self.cancel_when_drained = Some(token);
    }

    /// Sent frames excluding ACK and wake-up writes
    pub fn sent_commands(&self) -> Vec<Vec<u8>> {
        self.sent
            .iter()
            .filter(|w| is_command_frame(w))
            .cloned()
            .collect()
    }

    /// Wrap into a shared handle so a test keeps access after handing the
    /// transport to a controller.
    pub fn shared(self) -> Rc<RefCell<MockTransport>> {
        Rc::new(RefCell::new(self))
    }
}

fn is_command_frame(data: &[u8]) -> bool {
    data.starts_with(&PN532_PREAMBLE) && data != PN532_ACK
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        if self.closed {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "mock transport closed",
            )));
        }
        if self.write_failures > 0 {
            self.write_failures -= 1;
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "simulated write failure",
            )));
        }
        self.sent.push(data.to_vec());
        if is_command_frame(data) {
            if let Some(reply) = self.replies.pop_front() {
                self.rx.extend(reply);
            }
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8], _timeout_ms: u64) -> Result<usize> {
        if self.rx.is_empty() {
            if self.replies.is_empty() {
                if let Some(token) = &self.cancel_when_drained {
                    token.cancel("mock transport drained");
                }
            }
            return Ok(0);
        }
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn clear_input(&mut self) -> Result<()> {
        self.clear_count += 1;
        self.rx.clear();
        Ok(())
    }

    fn set_control_lines(&mut self, dtr: bool, rts: bool) -> Result<()> {
        self.control_lines.push((dtr, rts));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

impl Transport for Rc<RefCell<MockTransport>> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.borrow_mut().write(data)
    }

    fn read(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        self.borrow_mut().read(buf, timeout_ms)
    }

    fn clear_input(&mut self) -> Result<()> {
        self.borrow_mut().clear_input()
    }

    fn set_control_lines(&mut self, dtr: bool, rts: bool) -> Result<()> {
        self.borrow_mut().set_control_lines(dtr, rts)
    }

    fn close(&mut self) -> Result<()> {
        self.borrow_mut().close()
    }
}
