//! ALU operator tags.

use serde::{Serialize, Deserialize};

/// A 4-bit ALU operator tag.
///
/// An ALU is armed by writing one of these encodings to its operator latch;
/// the operation runs on the latched left/right inputs whenever the ALU is
/// next selected. The numeric values are the wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum AluOp {
    /// No operation. The result is always 0.
    Nop = 0x0,
    /// Wrapping 32-bit addition.
    Add = 0x1,
    /// Wrapping 32-bit subtraction.
    Sub = 0x2,
    /// Wrapping 32-bit multiplication.
    Mul = 0x3,
    /// Unsigned division. Division by zero yields `u32::MAX`.
    Div = 0x4,
    /// Unsigned remainder. Modulo by zero yields the left operand.
    Mod = 0x5,
    /// Equality; 1 if equal, else 0.
    Eql = 0x6,
    /// Shift left. The shift amount is the low 5 bits of the right operand.
    Sl = 0x7,
    /// Logical shift right.
    Sr = 0x8,
    /// Arithmetic shift right (sign-extending).
    Sra = 0x9,
    /// Bitwise complement of the left operand; the right operand is ignored.
    Not = 0xA,
    /// Bitwise AND.
    And = 0xB,
    /// Bitwise OR.
    Or = 0xC,
    /// Bitwise XOR.
    Xor = 0xD,
    /// Unsigned greater-than; 1 or 0.
    Gt = 0xE,
    /// Unsigned less-than; 1 or 0.
    Lt = 0xF,
}

impl AluOp {
    /// Decode a 4-bit field into an operator tag. Total over all 16 encodings.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0xF {
            0x0 => AluOp::Nop,
            0x1 => AluOp::Add,
            0x2 => AluOp::Sub,
            0x3 => AluOp::Mul,
            0x4 => AluOp::Div,
            0x5 => AluOp::Mod,
            0x6 => AluOp::Eql,
            0x7 => AluOp::Sl,
            0x8 => AluOp::Sr,
            0x9 => AluOp::Sra,
            0xA => AluOp::Not,
            0xB => AluOp::And,
            0xC => AluOp::Or,
            0xD => AluOp::Xor,
            0xE => AluOp::Gt,
            _ => AluOp::Lt,
        }
    }

    /// Encode back to the 4-bit field.
    pub fn to_bits(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alu_op_roundtrip() {
        for bits in 0u8..16 {
            assert_eq!(AluOp::from_bits(bits).to_bits(), bits);
        }
    }
}
