//! The processor: functional units, the two bus ports and the core that
//! ties them together.

pub mod alu;
pub mod bus;
pub mod core;
pub mod decode;
pub mod execute;
pub mod registers;
pub mod sequencer;
pub mod stack;

pub use self::alu::{AluBank, AluUnit, ALU_COUNT};
pub use self::bus::{BusPort, BusResponder};
pub use self::core::Core;
pub use self::decode::{decode, Decoded, Selection};
pub use self::execute::{ExecuteEngine, Transport};
pub use self::registers::{RegisterBank, REGISTER_COUNT};
pub use self::sequencer::Sequencer;
pub use self::stack::{StackEngine, StackOp, STACK_COUNT, STACK_DEPTH};
