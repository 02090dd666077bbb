//! The valid/ready bus handshake.
//!
//! Both the instruction bus and the data bus use the same single-
//! outstanding-request protocol: the requester asserts `valid` together with
//! an address (and, for writes, data plus a byte-lane strobe); the responder
//! asserts `ready` for the tick(s) it wants to signal completion and presents
//! `read_data` when satisfying a read. The requester drops `valid` once it
//! has observed `ready`, and must leave it low for at least one tick before
//! raising the next request.
//!
//! There is no error or abort signalling: a responder that never asserts
//! `ready` stalls the processor indefinitely.

use serde::{Serialize, Deserialize};

/// One side of a bus: all request and response lines for a single
/// outstanding transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusPort {
    /// Request line; held until `ready` is observed.
    pub valid: bool,
    /// Word address of the transaction.
    pub addr: u32,
    /// Byte-lane write strobe. `0x0` for reads, `0xF` for the full-word
    /// writes this design issues; no sub-word granularity exists.
    pub wstrb: u8,
    /// Data presented by the requester on writes.
    pub write_data: u32,
    /// Data presented by the responder on reads.
    pub read_data: u32,
    /// Completion line, driven by the responder.
    pub ready: bool,
    /// Tags instruction fetches; only meaningful on the instruction bus.
    pub instr: bool,
}

impl BusPort {
    /// Create an idle port.
    pub fn new() -> Self {
        Self {
            valid: false,
            addr: 0,
            wstrb: 0,
            write_data: 0,
            read_data: 0,
            ready: false,
            instr: false,
        }
    }

    /// Raise a read request.
    pub fn begin_read(&mut self, addr: u32, instr: bool) {
        self.valid = true;
        self.addr = addr;
        self.wstrb = 0;
        self.write_data = 0;
        self.instr = instr;
    }

    /// Raise a full-word write request (all four lanes strobed).
    pub fn begin_write(&mut self, addr: u32, data: u32) {
        self.valid = true;
        self.addr = addr;
        self.wstrb = 0xF;
        self.write_data = data;
        self.instr = false;
    }

    /// Drop the request after `ready` has been observed.
    pub fn end(&mut self) {
        self.valid = false;
        self.wstrb = 0;
        self.instr = false;
    }

    /// Clear all lines.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BusPort {
    fn default() -> Self {
        Self::new()
    }
}

/// The responder side of the bus protocol, implemented by memory models.
pub trait BusResponder {
    /// Service the port for one tick: satisfy any pending request and drive
    /// `ready`.
    fn respond(&mut self, port: &mut BusPort);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_request_lines() {
        let mut port = BusPort::new();
        port.begin_read(0x123, true);
        assert!(port.valid);
        assert!(port.instr);
        assert_eq!(port.addr, 0x123);
        assert_eq!(port.wstrb, 0);
    }

    #[test]
    fn test_write_request_strobes_all_lanes() {
        let mut port = BusPort::new();
        port.begin_write(7, 0xDEADBEEF);
        assert!(port.valid);
        assert_eq!(port.wstrb, 0xF);
        assert_eq!(port.write_data, 0xDEADBEEF);
    }

    #[test]
    fn test_end_drops_request() {
        let mut port = BusPort::new();
        port.begin_write(7, 1);
        port.end();
        assert!(!port.valid);
        assert_eq!(port.wstrb, 0);
    }
}
