//! Machine-code construction.
//!
//! A small fluent builder for one instruction at a time:
//!
//! ```
//! use tta::asm::instr;
//! use tta::isa::Unit;
//!
//! let words = instr()
//!     .src(Unit::AbsImmediate)
//!     .si(42)
//!     .dst(Unit::Register)
//!     .di(5)
//!     .assemble();
//! assert_eq!(words.len(), 1);
//! ```
//!
//! Operand-carrying units must be paired with their operand word; `assemble`
//! panics on a mismatch.

use crate::isa::{OpWord, Unit};

/// One instruction under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    src_unit: Unit,
    src_imm: u16,
    dst_unit: Unit,
    dst_imm: u16,
    soperand: Option<u32>,
    doperand: Option<u32>,
}

/// Start building an instruction. Both endpoints default to [`Unit::None`].
pub fn instr() -> Instr {
    Instr {
        src_unit: Unit::None,
        src_imm: 0,
        dst_unit: Unit::None,
        dst_imm: 0,
        soperand: None,
        doperand: None,
    }
}

impl Instr {
    /// Set the source unit.
    pub fn src(mut self, unit: Unit) -> Self {
        self.src_unit = unit;
        self
    }

    /// Set the 12-bit source immediate.
    pub fn si(mut self, imm: u16) -> Self {
        assert!(imm < 0x1000, "source immediate {imm:#x} exceeds 12 bits");
        self.src_imm = imm;
        self
    }

    /// Set the destination unit.
    pub fn dst(mut self, unit: Unit) -> Self {
        self.dst_unit = unit;
        self
    }

    /// Set the 12-bit destination immediate.
    pub fn di(mut self, imm: u16) -> Self {
        assert!(imm < 0x1000, "destination immediate {imm:#x} exceeds 12 bits");
        self.dst_imm = imm;
        self
    }

    /// Attach the trailing source operand word.
    pub fn soperand(mut self, word: u32) -> Self {
        self.soperand = Some(word);
        self
    }

    /// Attach the trailing destination operand word.
    pub fn doperand(mut self, word: u32) -> Self {
        self.doperand = Some(word);
        self
    }

    /// Emit the instruction as 1 to 3 words.
    ///
    /// # Panics
    ///
    /// Panics if an operand word is attached to a unit that takes none, or
    /// missing from one that needs it.
    pub fn assemble(self) -> Vec<u32> {
        assert_eq!(
            self.src_unit.needs_operand(),
            self.soperand.is_some(),
            "source unit {:?} and source operand disagree",
            self.src_unit,
        );
        assert_eq!(
            self.dst_unit.needs_operand(),
            self.doperand.is_some(),
            "destination unit {:?} and destination operand disagree",
            self.dst_unit,
        );
        let opword = OpWord {
            src_unit: self.src_unit,
            src_imm: self.src_imm,
            dst_unit: self.dst_unit,
            dst_imm: self.dst_imm,
        };
        let mut words = vec![opword.pack()];
        words.extend(self.soperand);
        words.extend(self.doperand);
        words
    }
}

/// Assemble a sequence of instructions into one contiguous image.
pub fn assemble_program<I>(instrs: I) -> Vec<u32>
where
    I: IntoIterator<Item = Instr>,
{
    instrs.into_iter().flat_map(Instr::assemble).collect()
}
