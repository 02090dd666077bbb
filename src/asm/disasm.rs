//! Disassembly.
//!
//! Walks a word stream, consuming trailing operand words as the unit tags
//! demand, and renders one line per instruction:
//!
//! ```text
//! R5 := #0x2A
//! *(0x10) := R5
//! ALU0.LEFT := POP3
//! JMP #0x2
//! NOP
//! ```

use crate::isa::{OpWord, Unit};

/// One disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Word address of the opcode word.
    pub addr: u32,
    /// Raw words, opcode first.
    pub words: Vec<u32>,
    /// Rendered text.
    pub text: String,
}

fn endpoint(unit: Unit, imm: u16, operand: Option<u32>, is_src: bool) -> String {
    match unit {
        Unit::None => "0".to_string(),
        Unit::StackPushPop => {
            let stack = imm & 0x7;
            if is_src {
                format!("POP{stack}")
            } else {
                format!("PUSH{stack}")
            }
        }
        Unit::StackIndex => format!("S{}[{}]", imm & 0x7, (imm >> 3) & 0x3F),
        Unit::Register => format!("R{}", imm & 0x1F),
        Unit::AluLeft => format!("ALU{}.LEFT", imm & 0x7),
        Unit::AluRight => format!("ALU{}.RIGHT", imm & 0x7),
        Unit::AluOperator => format!("ALU{}.OP", imm & 0x7),
        Unit::AluResult => format!("ALU{}.RESULT", imm & 0x7),
        Unit::MemoryImmediate => format!("*(0x{imm:X})"),
        Unit::MemoryOperand => format!("*(0x{:X})", operand.unwrap_or(0)),
        Unit::Pc => "PC".to_string(),
        Unit::AbsImmediate => format!("#0x{imm:X}"),
        Unit::AbsOperand => format!("#0x{:X}", operand.unwrap_or(0)),
        Unit::RegisterPointer => format!("*R{}", imm & 0x1F),
    }
}

/// Render one instruction from its unpacked opcode word and operands.
pub fn render(w: &OpWord, soperand: Option<u32>, doperand: Option<u32>) -> String {
    let src = endpoint(w.src_unit, w.src_imm, soperand, true);
    match w.dst_unit {
        Unit::None => "NOP".to_string(),
        Unit::Pc => format!("JMP {src}"),
        _ => {
            let dst = endpoint(w.dst_unit, w.dst_imm, doperand, false);
            format!("{dst} := {src}")
        }
    }
}

/// Disassemble a whole image, starting at word address 0.
///
/// A truncated trailing instruction (opcode present, operand word missing)
/// is rendered with the missing operand as 0.
pub fn disassemble(image: &[u32]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut addr = 0usize;
    while addr < image.len() {
        let w = OpWord::unpack(image[addr]);
        let mut words = vec![image[addr]];
        let mut next = addr + 1;
        let mut take = |needed: bool| -> Option<u32> {
            if !needed {
                return None;
            }
            let word = image.get(next).copied();
            if let Some(word) = word {
                words.push(word);
                next += 1;
            }
            word.or(Some(0))
        };
        let soperand = take(w.needs_src_operand());
        let doperand = take(w.needs_dst_operand());
        lines.push(Line {
            addr: addr as u32,
            text: render(&w, soperand, doperand),
            words,
        });
        addr = next;
    }
    lines
}
