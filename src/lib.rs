//! A cycle-accurate emulator of a transport-triggered processor.
//!
//! The machine executes by moving values: every instruction names a source
//! unit and a destination unit, and arithmetic, memory access and control
//! flow all happen as side effects of where a value is read from and where
//! it lands. The core talks to the outside world over two valid/ready buses
//! (instructions and data); memories and peripherals live in [`sim`].
//!
//! The crate splits into four layers:
//!
//! - [`isa`] - unit tags, ALU operators and the 32-bit opcode word
//! - [`cpu`] - the sequencer, execute engine, register/ALU/stack units and
//!   the [`Core`] that clocks them
//! - [`sim`] - bus-attached RAM, a serial sink and the assembled [`System`]
//! - [`asm`] - machine-code construction, disassembly and image files

pub mod asm;
pub mod cpu;
pub mod isa;
pub mod sim;

pub use cpu::Core;
pub use sim::System;
