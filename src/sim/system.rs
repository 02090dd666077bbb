//! A complete simulated board: core, program memory, data memory and an
//! optional serial tap.
//!
//! The data bus carries loads and stores; the instruction bus carries opcode
//! and operand fetches. Both memories answer in the same tick, which is the
//! timing the cycle budgets in the tests assume.

use crate::cpu::bus::BusResponder;
use crate::cpu::Core;
use crate::sim::ram::Ram;
use crate::sim::serial::SerialSink;
use serde::{Serialize, Deserialize};

/// Default size of each memory, in words.
pub const DEFAULT_MEMORY_WORDS: usize = 1024;

/// Core plus memories plus peripherals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    pub core: Core,
    /// Program memory, on the instruction bus.
    pub prg: Ram,
    /// Data memory, on the data bus.
    pub ram: Ram,
    /// Serial sink, sampling stores to `serial_addr`.
    pub serial: Option<SerialSink>,
    pub serial_addr: u32,
    /// Clock cycles elapsed.
    pub ticks: u64,
    /// Instructions completed (count of `done` pulses).
    pub retired: u64,
}

impl System {
    /// Create a board with empty default-sized memories and no serial sink.
    pub fn new() -> Self {
        Self::with_memory(DEFAULT_MEMORY_WORDS, DEFAULT_MEMORY_WORDS)
    }

    /// Create a board with the given memory sizes, in words.
    pub fn with_memory(prg_words: usize, ram_words: usize) -> Self {
        Self {
            core: Core::new(),
            prg: Ram::new(prg_words),
            ram: Ram::new(ram_words),
            serial: None,
            serial_addr: 0,
            ticks: 0,
            retired: 0,
        }
    }

    /// Create a board with `program` loaded at address 0.
    pub fn with_program(program: &[u32]) -> Self {
        let mut system = Self::new();
        system.load_program(program);
        system
    }

    /// Load a program image at address 0 of program memory.
    pub fn load_program(&mut self, program: &[u32]) {
        self.prg.load(0, program);
    }

    /// Attach a serial sink sampling stores to `addr`.
    pub fn attach_serial(&mut self, addr: u32) {
        self.serial = Some(SerialSink::new());
        self.serial_addr = addr;
    }

    /// Reset the core and the counters. Memory contents are kept.
    pub fn reset(&mut self) {
        self.core.reset();
        self.ticks = 0;
        self.retired = 0;
    }

    /// Advance the whole board one clock cycle.
    pub fn tick(&mut self) {
        self.core.tick();
        if self.core.done() {
            self.retired += 1;
        }
        self.ram.respond(&mut self.core.data_bus);
        self.prg.respond(&mut self.core.instr_bus);
        self.sample_serial();
        self.ticks += 1;
    }

    /// Sample the serial line on the acknowledge tick of a store. Each write
    /// transaction is acknowledged exactly once, so a memory that holds off
    /// `ready` for several ticks still yields one sample per store.
    fn sample_serial(&mut self) {
        if let Some(sink) = self.serial.as_mut() {
            let bus = &self.core.data_bus;
            if bus.valid && bus.wstrb != 0 && bus.ready && bus.addr == self.serial_addr {
                sink.push(bus.write_data & 1 != 0);
            }
        }
    }

    /// Run for exactly `n` ticks.
    pub fn run_ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Run until `count` instructions have retired, returning the tick count
    /// at which the last one completed, or `None` if `max_ticks` elapsed
    /// first.
    pub fn run_until_retired(&mut self, count: u64, max_ticks: u64) -> Option<u64> {
        while self.ticks < max_ticks {
            self.tick();
            if self.retired >= count {
                return Some(self.ticks);
            }
        }
        None
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}
