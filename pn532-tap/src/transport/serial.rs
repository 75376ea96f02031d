// pn532-tap/src/transport/serial.rs

#![cfg(feature = "serial")]

use std::io::{Read, Write};

use log::debug;
use serialport::{ClearBuffer, FlowControl, SerialPort};

use crate::transport::traits::{Connector, Transport};
use crate::utils::{ms, DEFAULT_READ_TIMEOUT_MS};
use crate::{Error, Result};

/// PN532 HSU link over a USB-serial adapter. It is feature-gated behind
/// `--features serial` and requires the `serialport` crate.
pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
    path: String,
}

impl SerialTransport {
    /// Open `path` at `baud_rate`, 8N1 without flow control.
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .timeout(ms(DEFAULT_READ_TIMEOUT_MS))
            .flow_control(FlowControl::None)
            .open()?;
        debug!("opened {} at {} baud", path, baud_rate);
        Ok(Self {
            port: Some(port),
            path: path.to_string(),
        })
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "serial port already closed",
            ))
        })
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port()?;
        port.write_all(data)?;
        port.flush()?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize> {
        let port = self.port()?;
        port.set_timeout(ms(timeout_ms))?;
        match port.read(buf) {
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::TimedOut
                        | std::io::ErrorKind::WouldBlock
                        | std::io::ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn clear_input(&mut self) -> Result<()> {
        self.port()?.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn set_control_lines(&mut self, dtr: bool, rts: bool) -> Result<()> {
        let port = self.port()?;
        port.write_data_terminal_ready(dtr)?;
        port.write_request_to_send(rts)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!("serial port {} closed", self.path);
        }
        Ok(())
    }
}

/// Opens a [`SerialTransport`] on every connection attempt.
#[derive(Debug, Clone)]
pub struct SerialConnector {
    pub path: String,
    pub baud_rate: u32,
}

impl SerialConnector {
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
        }
    }
}

impl Connector for SerialConnector {
    fn describe(&self) -> String {
        self.path.clone()
    }

    fn connect(&mut self) -> Result<Box<dyn Transport>> {
        Ok(Box::new(SerialTransport::open(&self.path, self.baud_rate)?))
    }
}
