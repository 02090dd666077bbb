//! The ALU bank.
//!
//! Eight independent arithmetic units. Each holds two input latches, an
//! operator latch and a registered result. A unit recomputes its result on
//! every tick it is selected; loading any latch counts as a selection, as
//! does reading the result through the `AluResult` unit (which is why that
//! read costs an extra retrieve cycle).

use crate::isa::AluOp;
use serde::{Serialize, Deserialize};

/// Number of ALUs in the bank.
pub const ALU_COUNT: usize = 8;

/// One arithmetic unit: two input latches, an operator latch and the
/// registered result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AluUnit {
    pub a: u32,
    pub b: u32,
    pub op: AluOp,
    pub result: u32,
}

impl AluUnit {
    fn new() -> Self {
        Self {
            a: 0,
            b: 0,
            op: AluOp::Nop,
            result: 0,
        }
    }

    /// Combinationally evaluate `op(a, b)`.
    ///
    /// All arithmetic wraps at 32 bits. Shift amounts use the low 5 bits of
    /// the right operand. Comparisons yield 0 or 1 zero-extended. `Not` is
    /// unary on the left operand. Division by zero yields `u32::MAX` and
    /// modulo by zero yields the left operand.
    pub fn eval(&self) -> u32 {
        let (a, b) = (self.a, self.b);
        match self.op {
            AluOp::Nop => 0,
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Mul => a.wrapping_mul(b),
            AluOp::Div => {
                if b == 0 {
                    u32::MAX
                } else {
                    a / b
                }
            }
            AluOp::Mod => {
                if b == 0 {
                    a
                } else {
                    a % b
                }
            }
            AluOp::Eql => (a == b) as u32,
            AluOp::Sl => a << (b & 0x1F),
            AluOp::Sr => a >> (b & 0x1F),
            AluOp::Sra => ((a as i32) >> (b & 0x1F)) as u32,
            AluOp::Not => !a,
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Xor => a ^ b,
            AluOp::Gt => (a > b) as u32,
            AluOp::Lt => (a < b) as u32,
        }
    }
}

/// The bank of eight ALUs plus the one-shot select line raised by the
/// execute engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AluBank {
    units: [AluUnit; ALU_COUNT],
    select: Option<usize>,
}

impl AluBank {
    /// Create a bank with all units zeroed and no unit selected.
    pub fn new() -> Self {
        Self {
            units: [AluUnit::new(); ALU_COUNT],
            select: None,
        }
    }

    /// Reset every unit and drop any pending selection.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn index(imm: u16) -> usize {
        (imm as usize) & (ALU_COUNT - 1)
    }

    /// Raise the select line for one unit; its result registers this tick.
    pub fn select(&mut self, imm: u16) {
        self.select = Some(Self::index(imm));
    }

    /// Load the left input latch (also selects the unit).
    pub fn load_left(&mut self, imm: u16, value: u32) {
        self.units[Self::index(imm)].a = value;
        self.select = Some(Self::index(imm));
    }

    /// Load the right input latch (also selects the unit).
    pub fn load_right(&mut self, imm: u16, value: u32) {
        self.units[Self::index(imm)].b = value;
        self.select = Some(Self::index(imm));
    }

    /// Load the operator latch (also selects the unit).
    pub fn load_operator(&mut self, imm: u16, op: AluOp) {
        self.units[Self::index(imm)].op = op;
        self.select = Some(Self::index(imm));
    }

    /// Read the held left input latch (not the computed result).
    pub fn left(&self, imm: u16) -> u32 {
        self.units[Self::index(imm)].a
    }

    /// Read the held right input latch.
    pub fn right(&self, imm: u16) -> u32 {
        self.units[Self::index(imm)].b
    }

    /// Read the held operator latch.
    pub fn operator(&self, imm: u16) -> AluOp {
        self.units[Self::index(imm)].op
    }

    /// Read the registered result.
    pub fn result(&self, imm: u16) -> u32 {
        self.units[Self::index(imm)].result
    }

    /// Advance one tick: the selected unit (if any) registers its result.
    pub fn step(&mut self) {
        if let Some(i) = self.select.take() {
            self.units[i].result = self.units[i].eval();
        }
    }
}

impl Default for AluBank {
    fn default() -> Self {
        Self::new()
    }
}
