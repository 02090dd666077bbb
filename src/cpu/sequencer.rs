//! The instruction sequencer.
//!
//! Owns the program counter and the instruction bus. Fetches the opcode
//! word, decodes it, fetches up to two trailing operand words, then hands the
//! complete transport to the execute engine and waits for it to finish before
//! fetching again.
//!
//! Bus requests are spaced: after a completed transaction the request line
//! stays low for at least one tick before the next one is raised, which the
//! dedicated `*Start` issue states provide.

use crate::cpu::bus::BusPort;
use crate::cpu::decode::{decode, Decoded};
use crate::cpu::execute::{ExecuteEngine, Transport};
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum SeqState {
    /// Waiting for the execute engine; issue the next opcode fetch when it
    /// is free.
    Start,
    /// Opcode fetch outstanding.
    ReadOpcode,
    /// Spacing tick before the source-operand fetch.
    ReadSrcOperandStart,
    /// Source-operand fetch outstanding.
    ReadSrcOperand,
    /// Spacing tick before the destination-operand fetch.
    ReadDstOperandStart,
    /// Destination-operand fetch outstanding.
    ReadDstOperand,
}

/// Fetch state machine and program counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequencer {
    state: SeqState,
    pc: u32,
    decoded: Option<Decoded>,
    soperand: u32,
    doperand: u32,
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            state: SeqState::Start,
            pc: 0,
            decoded: None,
            soperand: 0,
            doperand: 0,
        }
    }

    /// Restart fetching from address 0.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The program counter. Already advanced past the current instruction by
    /// the time the execute engine runs, so a transport sourcing the pc
    /// observes the address of the next instruction.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Redirect fetching. The next opcode fetch starts at `addr`.
    pub fn jump(&mut self, addr: u32) {
        self.pc = addr;
    }

    /// Advance one tick.
    pub fn step(&mut self, bus: &mut BusPort, exec: &mut ExecuteEngine) {
        match self.state {
            SeqState::Start => {
                if !exec.busy() {
                    bus.begin_read(self.pc, true);
                    self.state = SeqState::ReadOpcode;
                }
            }
            SeqState::ReadOpcode => {
                if bus.ready {
                    let word = bus.read_data;
                    bus.end();
                    let d = decode(word);
                    self.decoded = Some(d);
                    self.soperand = 0;
                    self.doperand = 0;
                    if d.need_src_operand {
                        self.state = SeqState::ReadSrcOperandStart;
                    } else if d.need_dst_operand {
                        self.state = SeqState::ReadDstOperandStart;
                    } else {
                        self.publish(exec);
                    }
                }
            }
            SeqState::ReadSrcOperandStart => {
                bus.begin_read(self.pc.wrapping_add(1), false);
                self.state = SeqState::ReadSrcOperand;
            }
            SeqState::ReadSrcOperand => {
                if bus.ready {
                    self.soperand = bus.read_data;
                    bus.end();
                    let need_dst = self.decoded.map_or(false, |d| d.need_dst_operand);
                    if need_dst {
                        self.state = SeqState::ReadDstOperandStart;
                    } else {
                        self.publish(exec);
                    }
                }
            }
            SeqState::ReadDstOperandStart => {
                let skip = 1 + self.decoded.map_or(false, |d| d.need_src_operand) as u32;
                bus.begin_read(self.pc.wrapping_add(skip), false);
                self.state = SeqState::ReadDstOperand;
            }
            SeqState::ReadDstOperand => {
                if bus.ready {
                    self.doperand = bus.read_data;
                    bus.end();
                    self.publish(exec);
                }
            }
        }
    }

    /// Hand the assembled transport to the execute engine and advance the pc
    /// past the instruction.
    fn publish(&mut self, exec: &mut ExecuteEngine) {
        if let Some(op) = self.decoded.take() {
            self.pc = self.pc.wrapping_add(op.len());
            exec.load(Transport {
                op,
                soperand: self.soperand,
                doperand: self.doperand,
            });
        }
        self.state = SeqState::Start;
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}
