//! Word-addressed RAM behind the bus protocol.
//!
//! Services every request in the tick it is raised: `ready` mirrors `valid`
//! and `read_data` always reflects the addressed word. Writes apply only the
//! strobed byte lanes. Addresses wrap at the word count.

use crate::cpu::bus::{BusPort, BusResponder};
use serde::{Serialize, Deserialize};

/// A simple single-tick RAM model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ram {
    words: Vec<u32>,
}

impl Ram {
    /// Create a zeroed RAM of `words` 32-bit words.
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn index(&self, addr: u32) -> usize {
        (addr as usize) % self.words.len()
    }

    /// Read a word directly (outside the bus protocol).
    pub fn read(&self, addr: u32) -> u32 {
        self.words[self.index(addr)]
    }

    /// Write a word directly.
    pub fn write(&mut self, addr: u32, value: u32) {
        let i = self.index(addr);
        self.words[i] = value;
    }

    /// Copy an image in at `base`.
    pub fn load(&mut self, base: u32, image: &[u32]) {
        for (offset, &word) in image.iter().enumerate() {
            self.write(base.wrapping_add(offset as u32), word);
        }
    }

    /// Zero all words.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }
}

impl BusResponder for Ram {
    fn respond(&mut self, port: &mut BusPort) {
        port.ready = port.valid;
        if !port.valid {
            return;
        }
        let i = self.index(port.addr);
        if port.wstrb != 0 {
            let mut bytes = self.words[i].to_le_bytes();
            let incoming = port.write_data.to_le_bytes();
            for lane in 0..4 {
                if port.wstrb & (1 << lane) != 0 {
                    bytes[lane] = incoming[lane];
                }
            }
            self.words[i] = u32::from_le_bytes(bytes);
        }
        port.read_data = self.words[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_over_bus() {
        let mut ram = Ram::new(16);
        ram.write(3, 0xCAFEBABE);
        let mut port = BusPort::new();
        port.begin_read(3, false);
        ram.respond(&mut port);
        assert!(port.ready);
        assert_eq!(port.read_data, 0xCAFEBABE);
    }

    #[test]
    fn test_write_over_bus_strobes_lanes() {
        let mut ram = Ram::new(16);
        ram.write(5, 0xAABBCCDD);
        let mut port = BusPort::new();
        port.begin_write(5, 0x11223344);
        port.wstrb = 0b0101;
        ram.respond(&mut port);
        assert_eq!(ram.read(5), 0xAA22CC44);
    }

    #[test]
    fn test_idle_port_not_ready() {
        let mut ram = Ram::new(16);
        let mut port = BusPort::new();
        ram.respond(&mut port);
        assert!(!port.ready);
    }

    #[test]
    fn test_addresses_wrap() {
        let mut ram = Ram::new(16);
        ram.write(16 + 2, 7);
        assert_eq!(ram.read(2), 7);
    }
}
