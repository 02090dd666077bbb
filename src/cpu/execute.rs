//! The execute engine.
//!
//! Carries one transport at a time through two phases: resolve the source
//! value, then deliver it to the destination. Each phase may need extra
//! ticks to wait on the data bus, an ALU result registration or the stack
//! engine.
//!
//! Memory writes are posted: the write request is raised and the transport
//! completes in the same tick; the request is dropped at the start of a
//! later tick once the responder's `ready` has been observed. A transport
//! that needs the data bus holds in its dispatch state while a posted write
//! is still outstanding, so the bus never carries two requests at once even
//! against a slow responder.
//!
//! `done` pulses high for exactly one tick per completed transport.

use crate::cpu::alu::AluBank;
use crate::cpu::bus::BusPort;
use crate::cpu::decode::Decoded;
use crate::cpu::registers::RegisterBank;
use crate::cpu::sequencer::Sequencer;
use crate::cpu::stack::{offset_of_imm, stack_of_imm, StackEngine, StackOp};
use crate::isa::{AluOp, Unit};
use serde::{Serialize, Deserialize};

/// A published instruction: the decoded opcode plus any trailing operand
/// words the sequencer fetched for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transport {
    pub op: Decoded,
    pub soperand: u32,
    pub doperand: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ExecState {
    Idle,
    /// Dispatch on the source unit.
    StartSrc,
    /// Data-bus read outstanding for the source value.
    SrcMemRetrieve,
    /// ALU result registers this tick; read it next tick.
    SrcAluRetrieve,
    /// Stack pop or indexed read in flight.
    SrcStackWait,
    /// Dispatch on the destination unit.
    StartDst,
    /// Stack push or indexed write in flight.
    DstStackWait,
}

/// Source-then-destination transport state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteEngine {
    state: ExecState,
    current: Option<Transport>,
    value: u32,
    done: bool,
}

impl ExecuteEngine {
    pub fn new() -> Self {
        Self {
            state: ExecState::Idle,
            current: None,
            value: 0,
            done: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Accept a transport from the sequencer. Only called while idle.
    pub fn load(&mut self, transport: Transport) {
        self.current = Some(transport);
        self.state = ExecState::StartSrc;
    }

    /// A transport is in flight; the sequencer holds off fetching.
    pub fn busy(&self) -> bool {
        self.current.is_some()
    }

    /// One-tick completion pulse.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Advance one tick.
    pub fn step(
        &mut self,
        regs: &mut RegisterBank,
        alus: &mut AluBank,
        stacks: &mut StackEngine,
        seq: &mut Sequencer,
        bus: &mut BusPort,
    ) {
        self.done = false;

        // Retire a posted write once the responder has acknowledged it.
        if bus.valid && bus.wstrb != 0 && bus.ready {
            bus.end();
        }

        let Some(t) = self.current else {
            return;
        };

        match self.state {
            ExecState::Idle => {}
            ExecState::StartSrc => self.start_src(t, regs, alus, stacks, seq, bus),
            ExecState::SrcMemRetrieve => {
                if bus.ready {
                    self.value = bus.read_data;
                    bus.end();
                    self.state = ExecState::StartDst;
                }
            }
            ExecState::SrcAluRetrieve => {
                self.value = alus.result(t.op.src.imm);
                self.state = ExecState::StartDst;
            }
            ExecState::SrcStackWait => {
                if stacks.ready() {
                    self.value = stacks.output();
                    self.state = ExecState::StartDst;
                }
            }
            ExecState::StartDst => self.start_dst(t, regs, alus, stacks, seq, bus),
            ExecState::DstStackWait => {
                if stacks.ready() {
                    self.complete();
                }
            }
        }
    }

    fn start_src(
        &mut self,
        t: Transport,
        regs: &RegisterBank,
        alus: &mut AluBank,
        stacks: &mut StackEngine,
        seq: &Sequencer,
        bus: &mut BusPort,
    ) {
        let src = t.op.src;
        let needs_bus = matches!(
            src.unit,
            Unit::MemoryImmediate | Unit::MemoryOperand | Unit::RegisterPointer
        );
        // An earlier posted write may still hold the bus; retry next tick.
        if needs_bus && bus.valid {
            return;
        }
        match src.unit {
            Unit::None => {
                self.value = 0;
                if t.op.dst.unit == Unit::None {
                    // A full no-op never enters the destination phase.
                    self.complete();
                } else {
                    self.state = ExecState::StartDst;
                }
            }
            Unit::StackPushPop => {
                stacks.submit(StackOp::Pop {
                    stack: stack_of_imm(src.imm),
                });
                self.state = ExecState::SrcStackWait;
            }
            Unit::StackIndex => {
                stacks.submit(StackOp::ReadIndex {
                    stack: stack_of_imm(src.imm),
                    offset: offset_of_imm(src.imm),
                });
                self.state = ExecState::SrcStackWait;
            }
            Unit::Register => {
                self.value = regs.read(src.imm);
                self.state = ExecState::StartDst;
            }
            Unit::AluLeft => {
                self.value = alus.left(src.imm);
                self.state = ExecState::StartDst;
            }
            Unit::AluRight => {
                self.value = alus.right(src.imm);
                self.state = ExecState::StartDst;
            }
            Unit::AluOperator => {
                self.value = alus.operator(src.imm).to_bits() as u32;
                self.state = ExecState::StartDst;
            }
            Unit::AluResult => {
                alus.select(src.imm);
                self.state = ExecState::SrcAluRetrieve;
            }
            Unit::MemoryImmediate => {
                bus.begin_read(src.imm as u32, false);
                self.state = ExecState::SrcMemRetrieve;
            }
            Unit::MemoryOperand => {
                bus.begin_read(t.soperand, false);
                self.state = ExecState::SrcMemRetrieve;
            }
            Unit::Pc => {
                self.value = seq.pc();
                self.state = ExecState::StartDst;
            }
            Unit::AbsImmediate => {
                self.value = src.imm as u32;
                self.state = ExecState::StartDst;
            }
            Unit::AbsOperand => {
                self.value = t.soperand;
                self.state = ExecState::StartDst;
            }
            Unit::RegisterPointer => {
                bus.begin_read(regs.read(src.imm), false);
                self.state = ExecState::SrcMemRetrieve;
            }
        }
    }

    fn start_dst(
        &mut self,
        t: Transport,
        regs: &mut RegisterBank,
        alus: &mut AluBank,
        stacks: &mut StackEngine,
        seq: &mut Sequencer,
        bus: &mut BusPort,
    ) {
        let dst = t.op.dst;
        let needs_bus = matches!(
            dst.unit,
            Unit::MemoryImmediate | Unit::MemoryOperand | Unit::RegisterPointer
        );
        // An earlier posted write may still hold the bus; retry next tick.
        if needs_bus && bus.valid {
            return;
        }
        let value = self.value;
        match dst.unit {
            // Read-only endpoints discard the value.
            Unit::None | Unit::AbsImmediate | Unit::AbsOperand | Unit::AluResult => {
                self.complete();
            }
            Unit::StackPushPop => {
                stacks.submit(StackOp::Push {
                    stack: stack_of_imm(dst.imm),
                    value,
                });
                self.state = ExecState::DstStackWait;
            }
            Unit::StackIndex => {
                stacks.submit(StackOp::WriteIndex {
                    stack: stack_of_imm(dst.imm),
                    offset: offset_of_imm(dst.imm),
                    value,
                });
                self.state = ExecState::DstStackWait;
            }
            Unit::Register => {
                regs.write(dst.imm, value);
                self.complete();
            }
            Unit::AluLeft => {
                alus.load_left(dst.imm, value);
                self.complete();
            }
            Unit::AluRight => {
                alus.load_right(dst.imm, value);
                self.complete();
            }
            Unit::AluOperator => {
                alus.load_operator(dst.imm, AluOp::from_bits(value as u8));
                self.complete();
            }
            Unit::MemoryImmediate => {
                bus.begin_write(dst.imm as u32, value);
                self.complete();
            }
            Unit::MemoryOperand => {
                bus.begin_write(t.doperand, value);
                self.complete();
            }
            Unit::Pc => {
                seq.jump(value);
                self.complete();
            }
            Unit::RegisterPointer => {
                bus.begin_write(regs.read(dst.imm), value);
                self.complete();
            }
        }
    }

    fn complete(&mut self) {
        self.current = None;
        self.state = ExecState::Idle;
        self.done = true;
    }
}

impl Default for ExecuteEngine {
    fn default() -> Self {
        Self::new()
    }
}
