//! Opcode decode.
//!
//! Decode is purely combinational: the sequencer decodes the opcode word in
//! the same tick it latches it off the instruction bus. There is no error
//! path; every 32-bit value decodes to something (unused unit encodings read
//! as [`Unit::None`]).

use crate::isa::{OpWord, Unit};
use serde::{Serialize, Deserialize};

/// One endpoint of a transport: a unit tag plus its 12-bit immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub unit: Unit,
    pub imm: u16,
}

/// A fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub src: Selection,
    pub dst: Selection,
    /// A 32-bit source operand word follows the opcode word.
    pub need_src_operand: bool,
    /// A 32-bit destination operand word follows (after the source operand
    /// when both are present).
    pub need_dst_operand: bool,
}

impl Decoded {
    /// Instruction length in words (1, 2 or 3).
    pub fn len(&self) -> u32 {
        1 + self.need_src_operand as u32 + self.need_dst_operand as u32
    }
}

/// Decode one opcode word.
pub fn decode(word: u32) -> Decoded {
    let w = OpWord::unpack(word);
    Decoded {
        src: Selection {
            unit: w.src_unit,
            imm: w.src_imm,
        },
        dst: Selection {
            unit: w.dst_unit,
            imm: w.dst_imm,
        },
        need_src_operand: w.needs_src_operand(),
        need_dst_operand: w.needs_dst_operand(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fields() {
        let word = OpWord {
            src_unit: Unit::Register,
            src_imm: 5,
            dst_unit: Unit::MemoryImmediate,
            dst_imm: 16,
        }
        .pack();
        let d = decode(word);
        assert_eq!(d.src, Selection { unit: Unit::Register, imm: 5 });
        assert_eq!(d.dst, Selection { unit: Unit::MemoryImmediate, imm: 16 });
        assert!(!d.need_src_operand);
        assert!(!d.need_dst_operand);
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_decode_operand_lengths() {
        let word = OpWord {
            src_unit: Unit::AbsOperand,
            src_imm: 0,
            dst_unit: Unit::MemoryOperand,
            dst_imm: 0,
        }
        .pack();
        let d = decode(word);
        assert!(d.need_src_operand);
        assert!(d.need_dst_operand);
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn test_zero_word_is_full_nop() {
        let d = decode(0);
        assert_eq!(d.src.unit, Unit::None);
        assert_eq!(d.dst.unit, Unit::None);
        assert_eq!(d.len(), 1);
    }
}
