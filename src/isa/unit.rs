//! Functional-unit tags.
//!
//! Every instruction names two units: the endpoint a value is read from and
//! the endpoint it is delivered to. Moving the value is the instruction;
//! arithmetic and memory access happen as side effects of where it lands.

use serde::{Serialize, Deserialize};

/// A 4-bit functional-unit tag.
///
/// The numeric values are the wire encoding and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Unit {
    /// No unit. Reads as zero, discards writes.
    None = 0,
    /// Stack push (destination) or pop (source). Immediate bits 2:0 select the stack.
    StackPushPop = 1,
    /// Indexed stack access. Immediate bits 2:0 select the stack, bits 8:3 the offset from the top.
    StackIndex = 2,
    /// One of the 32 general registers, selected by the immediate.
    Register = 3,
    /// Left input latch of an ALU, selected by the immediate.
    AluLeft = 4,
    /// Right input latch of an ALU.
    AluRight = 5,
    /// Operator latch of an ALU. Writing one of the [`AluOp`](crate::isa::AluOp) encodings here arms the ALU.
    AluOperator = 6,
    /// Registered result of an ALU.
    AluResult = 7,
    /// Memory word addressed by the zero-extended 12-bit immediate.
    MemoryImmediate = 8,
    /// Memory word addressed by a trailing 32-bit operand word.
    MemoryOperand = 9,
    /// The program counter. As a destination this is a jump.
    Pc = 10,
    /// The zero-extended 12-bit immediate itself.
    AbsImmediate = 11,
    /// A trailing 32-bit operand word itself.
    AbsOperand = 12,
    /// Memory word addressed by the contents of the register named by the immediate.
    RegisterPointer = 13,
}

impl Unit {
    /// Decode a 4-bit field into a unit tag.
    ///
    /// The encodings 14 and 15 are unused by the instruction format; they
    /// decode as [`Unit::None`]. This is accepted undefined behavior of the
    /// format, not a validation error.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0xF {
            0 => Unit::None,
            1 => Unit::StackPushPop,
            2 => Unit::StackIndex,
            3 => Unit::Register,
            4 => Unit::AluLeft,
            5 => Unit::AluRight,
            6 => Unit::AluOperator,
            7 => Unit::AluResult,
            8 => Unit::MemoryImmediate,
            9 => Unit::MemoryOperand,
            10 => Unit::Pc,
            11 => Unit::AbsImmediate,
            12 => Unit::AbsOperand,
            13 => Unit::RegisterPointer,
            _ => Unit::None,
        }
    }

    /// Encode back to the 4-bit field.
    pub fn to_bits(self) -> u8 {
        self as u8
    }

    /// Whether this unit consumes a trailing 32-bit operand word from the
    /// instruction stream.
    pub fn needs_operand(self) -> bool {
        matches!(self, Unit::MemoryOperand | Unit::AbsOperand)
    }
}
