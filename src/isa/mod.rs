//! Instruction-format primitives for the TTA processor.
//!
//! This module provides the core types of the instruction set:
//! - [`Unit`] - A 4-bit functional-unit tag (source or destination endpoint)
//! - [`AluOp`] - A 4-bit ALU operator tag
//! - [`OpWord`] - The 32-bit opcode word and its fixed bit layout

mod unit;
mod alu_op;
mod word;

pub use unit::Unit;
pub use alu_op::AluOp;
pub use word::OpWord;
