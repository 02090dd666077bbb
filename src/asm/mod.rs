//! Building, rendering and storing machine code.

pub mod disasm;
pub mod image;
pub mod instr;

pub use disasm::{disassemble, render, Line};
pub use image::{format_image, load_image, parse_image, save_image, ImageError};
pub use instr::{assemble_program, instr, Instr};
