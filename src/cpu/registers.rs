//! The general-purpose register bank.
//!
//! 32 independently selectable 32-bit storage cells. Registers are
//! architectural state: they survive across instructions and are only
//! cleared by reset.

use serde::{Serialize, Deserialize};

/// Number of registers in the bank.
pub const REGISTER_COUNT: usize = 32;

/// The register bank: 32 x 32-bit cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterBank {
    regs: [u32; REGISTER_COUNT],
}

impl RegisterBank {
    /// Create a bank with all registers zeroed.
    pub fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
        }
    }

    /// Reset all registers to zero.
    pub fn reset(&mut self) {
        self.regs = [0; REGISTER_COUNT];
    }

    /// Read a register. The index comes from a 12-bit immediate; only its
    /// low 5 bits select the register.
    #[inline]
    pub fn read(&self, index: u16) -> u32 {
        self.regs[(index as usize) & (REGISTER_COUNT - 1)]
    }

    /// Write a register.
    #[inline]
    pub fn write(&mut self, index: u16, value: u32) {
        self.regs[(index as usize) & (REGISTER_COUNT - 1)] = value;
    }
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let mut bank = RegisterBank::new();
        for r in 0..REGISTER_COUNT as u16 {
            bank.write(r, 0x1000 + r as u32);
        }
        for r in 0..REGISTER_COUNT as u16 {
            assert_eq!(bank.read(r), 0x1000 + r as u32);
        }
    }

    #[test]
    fn test_index_uses_low_five_bits() {
        let mut bank = RegisterBank::new();
        bank.write(32 + 3, 99);
        assert_eq!(bank.read(3), 99);
    }

    #[test]
    fn test_reset_clears() {
        let mut bank = RegisterBank::new();
        bank.write(7, 42);
        bank.reset();
        assert_eq!(bank.read(7), 0);
    }
}
