//! The 32-bit opcode word.
//!
//! Bit layout, low bits first:
//!
//! ```text
//! [ 3:0]  src_unit       (4 bits)
//! [15:4]  src_immediate  (12 bits)
//! [19:16] dst_unit       (4 bits)
//! [31:20] dst_immediate  (12 bits)
//! ```
//!
//! Units that carry a full 32-bit value place it in a trailing operand word
//! immediately after the opcode word; if both source and destination need
//! one, the destination's operand follows the source's.

use crate::isa::Unit;
use serde::{Serialize, Deserialize};

/// A decoded view of one opcode word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpWord {
    pub src_unit: Unit,
    /// 12-bit source immediate.
    pub src_imm: u16,
    pub dst_unit: Unit,
    /// 12-bit destination immediate.
    pub dst_imm: u16,
}

impl OpWord {
    /// Unpack a raw 32-bit word into its fields.
    pub fn unpack(word: u32) -> Self {
        Self {
            src_unit: Unit::from_bits((word & 0xF) as u8),
            src_imm: ((word >> 4) & 0xFFF) as u16,
            dst_unit: Unit::from_bits(((word >> 16) & 0xF) as u8),
            dst_imm: ((word >> 20) & 0xFFF) as u16,
        }
    }

    /// Pack the fields back into a raw 32-bit word.
    pub fn pack(&self) -> u32 {
        (self.src_unit.to_bits() as u32)
            | (((self.src_imm as u32) & 0xFFF) << 4)
            | ((self.dst_unit.to_bits() as u32) << 16)
            | (((self.dst_imm as u32) & 0xFFF) << 20)
    }

    /// Whether a source operand word follows the opcode word.
    pub fn needs_src_operand(&self) -> bool {
        self.src_unit.needs_operand()
    }

    /// Whether a destination operand word follows.
    pub fn needs_dst_operand(&self) -> bool {
        self.dst_unit.needs_operand()
    }

    /// Total instruction length in words (1, 2 or 3).
    pub fn len(&self) -> u32 {
        1 + self.needs_src_operand() as u32 + self.needs_dst_operand() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        let w = OpWord {
            src_unit: Unit::Register,
            src_imm: 5,
            dst_unit: Unit::Register,
            dst_imm: 10,
        };
        let packed = w.pack();
        assert_eq!(packed & 0xF, Unit::Register.to_bits() as u32);
        assert_eq!((packed >> 4) & 0xFFF, 5);
        assert_eq!((packed >> 16) & 0xF, Unit::Register.to_bits() as u32);
        assert_eq!((packed >> 20) & 0xFFF, 10);
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        let w = OpWord {
            src_unit: Unit::MemoryOperand,
            src_imm: 0xABC,
            dst_unit: Unit::AluLeft,
            dst_imm: 0x123,
        };
        assert_eq!(OpWord::unpack(w.pack()), w);
    }

    #[test]
    fn test_len() {
        let mut w = OpWord {
            src_unit: Unit::Register,
            src_imm: 0,
            dst_unit: Unit::Register,
            dst_imm: 0,
        };
        assert_eq!(w.len(), 1);
        w.src_unit = Unit::AbsOperand;
        assert_eq!(w.len(), 2);
        w.dst_unit = Unit::MemoryOperand;
        assert_eq!(w.len(), 3);
    }
}
