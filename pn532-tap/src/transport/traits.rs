// pn532-tap/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the serial line away from protocol/device
/// logic.
pub trait Transport {
    /// Write raw bytes to the chip
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Read whatever is available into `buf`, waiting at most `timeout_ms`
    /// for the first byte. Returns `Ok(0)` when the timeout elapses with
    /// nothing received.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize>;

    /// Discard any bytes sitting in the receive buffer
    fn clear_input(&mut self) -> Result<()>;

    /// Drive the DTR and RTS modem control lines (`true` = asserted).
    fn set_control_lines(&mut self, dtr: bool, rts: bool) -> Result<()>;

    /// Release the underlying device. Further I/O fails. The default
    /// implementation does nothing for transports without an OS handle.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens a fresh transport for every connection attempt.
pub trait Connector {
    /// Human readable location of the device (port path), reported in the
    /// `ready` event.
    fn describe(&self) -> String;

    fn connect(&mut self) -> Result<Box<dyn Transport>>;
}
