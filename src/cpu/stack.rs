//! The multi-stack engine.
//!
//! Eight independent LIFO stacks of depth 64 behind one shared control: a
//! single operation (push, pop, or offset-indexed read/write) is accepted
//! per cycle, takes one cycle of latency, and `ready` is deasserted while it
//! is in flight.
//!
//! Overflow and underflow are architectural signals, not errors: the flags
//! pulse for one tick and the offending operation is dropped (a push is
//! discarded, a pop or read yields 0, an indexed write does not store).
//!
//! The engine keeps a single most-recent-write shadow record `(stack, slot,
//! value)` consulted first on every read, so a value written in the same or
//! immediately preceding cycle is visible to a read of that exact slot
//! before the underlying storage update can be observed externally.

use serde::{Serialize, Deserialize};

/// Number of stacks.
pub const STACK_COUNT: usize = 8;

/// Capacity of each stack, in words.
pub const STACK_DEPTH: usize = 64;

/// Select the stack id from a 12-bit immediate (bits 2:0).
pub fn stack_of_imm(imm: u16) -> usize {
    (imm as usize) & (STACK_COUNT - 1)
}

/// Select the indexed-access offset from a 12-bit immediate (bits 8:3).
/// Offset 0 addresses the current top of the stack.
pub fn offset_of_imm(imm: u16) -> usize {
    ((imm as usize) >> 3) & (STACK_DEPTH - 1)
}

/// A one-shot operation request raised by the execute engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackOp {
    Push { stack: usize, value: u32 },
    Pop { stack: usize },
    ReadIndex { stack: usize, offset: usize },
    WriteIndex { stack: usize, offset: usize, value: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum StackState {
    Idle,
    Serving,
}

/// The stack engine: storage, per-stack pointers, shared control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackEngine {
    /// Flat storage, `STACK_COUNT * STACK_DEPTH` words.
    slots: Vec<u32>,
    /// Per-stack pointer: 0 = empty, ascending on push.
    sp: [u8; STACK_COUNT],
    /// Most recent write: (stack, slot, value). Valid until overwritten or
    /// reset.
    shadow: Option<(usize, usize, u32)>,
    request: Option<StackOp>,
    state: StackState,
    output: u32,
    ready: bool,
    overflow: bool,
    underflow: bool,
}

impl StackEngine {
    /// Create an engine with all stacks empty.
    pub fn new() -> Self {
        Self {
            slots: vec![0; STACK_COUNT * STACK_DEPTH],
            sp: [0; STACK_COUNT],
            shadow: None,
            request: None,
            state: StackState::Idle,
            output: 0,
            ready: false,
            overflow: false,
            underflow: false,
        }
    }

    /// Clear all storage, pointers, the shadow record and any in-flight
    /// operation.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Submit an operation. The engine accepts one per cycle; the execute
    /// engine only submits while no operation is in flight.
    pub fn submit(&mut self, op: StackOp) {
        self.request = Some(op);
    }

    /// Completion line: low while an operation is in flight.
    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Output of the last pop or indexed read.
    pub fn output(&self) -> u32 {
        self.output
    }

    /// Overflow flag pulse (push attempted on a full stack).
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Underflow flag pulse (pop or indexed access past the live elements).
    pub fn underflow(&self) -> bool {
        self.underflow
    }

    /// Current element count of a stack.
    pub fn depth(&self, stack: usize) -> usize {
        self.sp[stack & (STACK_COUNT - 1)] as usize
    }

    /// Advance one tick.
    pub fn step(&mut self) {
        self.overflow = false;
        self.underflow = false;
        match self.state {
            StackState::Serving => {
                self.ready = true;
                self.state = StackState::Idle;
            }
            StackState::Idle => {
                if let Some(op) = self.request.take() {
                    self.ready = false;
                    self.service(op);
                    self.state = StackState::Serving;
                }
            }
        }
    }

    fn service(&mut self, op: StackOp) {
        match op {
            StackOp::Push { stack, value } => {
                let sp = self.sp[stack] as usize;
                if sp == STACK_DEPTH {
                    self.overflow = true;
                } else {
                    self.write_slot(stack, sp, value);
                    self.sp[stack] += 1;
                }
                self.output = value;
            }
            StackOp::Pop { stack } => {
                if self.sp[stack] == 0 {
                    self.underflow = true;
                    self.output = 0;
                } else {
                    self.sp[stack] -= 1;
                    self.output = self.read_slot(stack, self.sp[stack] as usize);
                }
            }
            StackOp::ReadIndex { stack, offset } => {
                let sp = self.sp[stack] as usize;
                if offset >= sp {
                    self.underflow = true;
                    self.output = 0;
                } else {
                    self.output = self.read_slot(stack, sp - 1 - offset);
                }
            }
            StackOp::WriteIndex { stack, offset, value } => {
                let sp = self.sp[stack] as usize;
                if offset >= sp {
                    self.underflow = true;
                } else {
                    self.write_slot(stack, sp - 1 - offset, value);
                }
                self.output = value;
            }
        }
    }

    /// Read a slot, consulting the most-recent-write shadow first.
    fn read_slot(&self, stack: usize, slot: usize) -> u32 {
        if let Some((s, sl, v)) = self.shadow {
            if s == stack && sl == slot {
                return v;
            }
        }
        self.slots[stack * STACK_DEPTH + slot]
    }

    fn write_slot(&mut self, stack: usize, slot: usize, value: u32) {
        self.shadow = Some((stack, slot, value));
        self.slots[stack * STACK_DEPTH + slot] = value;
    }
}

impl Default for StackEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run one operation to completion, returning the output.
    fn run_op(engine: &mut StackEngine, op: StackOp) -> u32 {
        engine.submit(op);
        engine.step(); // service (ready low)
        assert!(!engine.ready());
        engine.step(); // completion
        assert!(engine.ready());
        engine.output()
    }

    #[test]
    fn test_lifo_order() {
        let mut engine = StackEngine::new();
        for v in [10, 20, 30] {
            run_op(&mut engine, StackOp::Push { stack: 2, value: v });
        }
        assert_eq!(run_op(&mut engine, StackOp::Pop { stack: 2 }), 30);
        assert_eq!(run_op(&mut engine, StackOp::Pop { stack: 2 }), 20);
        assert_eq!(run_op(&mut engine, StackOp::Pop { stack: 2 }), 10);
    }

    #[test]
    fn test_stacks_independent() {
        let mut engine = StackEngine::new();
        run_op(&mut engine, StackOp::Push { stack: 0, value: 1 });
        run_op(&mut engine, StackOp::Push { stack: 7, value: 2 });
        assert_eq!(run_op(&mut engine, StackOp::Pop { stack: 0 }), 1);
        assert_eq!(run_op(&mut engine, StackOp::Pop { stack: 7 }), 2);
    }

    #[test]
    fn test_overflow_drops_push() {
        let mut engine = StackEngine::new();
        for v in 0..STACK_DEPTH as u32 {
            run_op(&mut engine, StackOp::Push { stack: 0, value: v });
            assert!(!engine.overflow());
        }
        assert_eq!(engine.depth(0), STACK_DEPTH);

        engine.submit(StackOp::Push { stack: 0, value: 999 });
        engine.step();
        assert!(engine.overflow());
        assert_eq!(engine.depth(0), STACK_DEPTH);

        // Flag is a one-tick pulse.
        engine.step();
        assert!(!engine.overflow());

        assert_eq!(
            run_op(&mut engine, StackOp::Pop { stack: 0 }),
            STACK_DEPTH as u32 - 1
        );
    }

    #[test]
    fn test_underflow_pop_yields_zero() {
        let mut engine = StackEngine::new();
        engine.submit(StackOp::Pop { stack: 3 });
        engine.step();
        assert!(engine.underflow());
        engine.step();
        assert!(!engine.underflow());
        assert_eq!(engine.output(), 0);
    }

    #[test]
    fn test_indexed_read_offsets() {
        let mut engine = StackEngine::new();
        run_op(&mut engine, StackOp::Push { stack: 1, value: 100 });
        run_op(&mut engine, StackOp::Push { stack: 1, value: 200 });
        assert_eq!(
            run_op(&mut engine, StackOp::ReadIndex { stack: 1, offset: 0 }),
            200
        );
        assert_eq!(
            run_op(&mut engine, StackOp::ReadIndex { stack: 1, offset: 1 }),
            100
        );
    }

    #[test]
    fn test_indexed_read_past_top_underflows() {
        let mut engine = StackEngine::new();
        run_op(&mut engine, StackOp::Push { stack: 1, value: 100 });
        engine.submit(StackOp::ReadIndex { stack: 1, offset: 1 });
        engine.step();
        assert!(engine.underflow());
        engine.step();
        assert_eq!(engine.output(), 0);
    }

    #[test]
    fn test_indexed_write_then_read_hazard_window() {
        let mut engine = StackEngine::new();
        run_op(&mut engine, StackOp::Push { stack: 4, value: 1 });
        run_op(&mut engine, StackOp::Push { stack: 4, value: 2 });

        // Write then read the same slot back-to-back; the shadow record must
        // satisfy the read.
        engine.submit(StackOp::WriteIndex { stack: 4, offset: 1, value: 77 });
        engine.step();
        engine.submit(StackOp::ReadIndex { stack: 4, offset: 1 });
        engine.step();
        engine.step();
        assert_eq!(engine.output(), 77);
    }

    #[test]
    fn test_indexed_write_out_of_range_is_dropped() {
        let mut engine = StackEngine::new();
        run_op(&mut engine, StackOp::Push { stack: 4, value: 5 });
        engine.submit(StackOp::WriteIndex { stack: 4, offset: 3, value: 9 });
        engine.step();
        assert!(engine.underflow());
        engine.step();
        assert_eq!(
            run_op(&mut engine, StackOp::ReadIndex { stack: 4, offset: 0 }),
            5
        );
    }

    #[test]
    fn test_imm_field_selection() {
        // stack id in bits 2:0, offset in bits 8:3
        assert_eq!(stack_of_imm(0b0_000101), 5);
        assert_eq!(offset_of_imm(0b101_000), 5);
        assert_eq!(stack_of_imm(0x1FF), 7);
        assert_eq!(offset_of_imm(0x1FF), 63);
    }
}
