//! Board-level simulation: memories, peripherals and the assembled system.

pub mod ram;
pub mod serial;
pub mod system;

pub use ram::Ram;
pub use serial::SerialSink;
pub use system::{System, DEFAULT_MEMORY_WORDS};
