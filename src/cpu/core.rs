//! The processor core.
//!
//! Composes the sequencer, the execute engine, the register bank, the ALU
//! bank and the stack engine around the two bus ports. The core itself owns
//! no memory: something outside must answer the instruction and data buses
//! each tick (see [`BusResponder`](crate::cpu::bus::BusResponder)).
//!
//! One call to [`Core::tick`] is one clock cycle. The evaluation order
//! inside a tick is fixed and is what pins the cycle-level timing:
//!
//! 1. execute engine (may complete, raising `done` and freeing the
//!    sequencer this same tick)
//! 2. sequencer (may publish a transport; the execute engine first acts on
//!    it next tick)
//! 3. stack engine
//! 4. ALU bank (a unit selected this tick registers its result now, so it
//!    reads back one tick later)
//!
//! With a responder that answers in the same tick, a one-word
//! register-to-register instruction takes 4 ticks and an `AluResult` read
//! takes 5.

use crate::cpu::alu::AluBank;
use crate::cpu::bus::BusPort;
use crate::cpu::execute::ExecuteEngine;
use crate::cpu::registers::RegisterBank;
use crate::cpu::sequencer::Sequencer;
use crate::cpu::stack::StackEngine;
use serde::{Serialize, Deserialize};

/// The complete core: all functional units plus both bus ports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Core {
    pub seq: Sequencer,
    pub exec: ExecuteEngine,
    pub regs: RegisterBank,
    pub alus: AluBank,
    pub stacks: StackEngine,
    pub instr_bus: BusPort,
    pub data_bus: BusPort,
}

impl Core {
    /// Create a core in its reset state, about to fetch from address 0.
    pub fn new() -> Self {
        Self {
            seq: Sequencer::new(),
            exec: ExecuteEngine::new(),
            regs: RegisterBank::new(),
            alus: AluBank::new(),
            stacks: StackEngine::new(),
            instr_bus: BusPort::new(),
            data_bus: BusPort::new(),
        }
    }

    /// Reset every unit and both buses; fetching restarts at address 0.
    pub fn reset(&mut self) {
        self.seq.reset();
        self.exec.reset();
        self.regs.reset();
        self.alus.reset();
        self.stacks.reset();
        self.instr_bus.reset();
        self.data_bus.reset();
    }

    /// Advance one clock cycle.
    pub fn tick(&mut self) {
        self.exec.step(
            &mut self.regs,
            &mut self.alus,
            &mut self.stacks,
            &mut self.seq,
            &mut self.data_bus,
        );
        self.seq.step(&mut self.instr_bus, &mut self.exec);
        self.stacks.step();
        self.alus.step();
    }

    /// One-tick pulse: an instruction completed this cycle.
    pub fn done(&self) -> bool {
        self.exec.done()
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.seq.pc()
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}
