//! Whole-system programs run against the cycle budgets the hardware meets.
//!
//! Every test assembles a small program, runs it on a [`System`] with
//! single-tick memories, and checks both the architectural result and the
//! number of ticks it took.

use tta::asm::{assemble_program, instr};
use tta::isa::{AluOp, Unit};
use tta::System;

#[test]
fn test_immediate_to_register_to_memory_in_8_ticks() {
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(666).dst(Unit::Register).di(0),
        instr().src(Unit::Register).si(0).dst(Unit::MemoryImmediate).di(123),
    ]);
    let mut system = System::with_program(&program);
    let ticks = system.run_until_retired(2, 8).expect("program overran budget");
    assert!(ticks <= 8);
    assert_eq!(system.ram.read(123), 666);
    assert_eq!(system.core.regs.read(0), 666);
}

#[test]
fn test_memory_immediate_copy_in_25_ticks() {
    let program = assemble_program([
        instr().src(Unit::MemoryImmediate).si(3).dst(Unit::MemoryImmediate).di(7),
    ]);
    let mut system = System::with_program(&program);
    system.ram.write(3, 0xDEAD_BEEF);
    system.run_until_retired(1, 25).expect("program overran budget");
    assert_eq!(system.ram.read(7), 0xDEAD_BEEF);
}

#[test]
fn test_memory_operand_copy_in_25_ticks() {
    let program = assemble_program([
        instr()
            .src(Unit::MemoryOperand)
            .soperand(0x200)
            .dst(Unit::MemoryOperand)
            .doperand(0x300),
    ]);
    let mut system = System::with_program(&program);
    system.ram.write(0x200, 123_456_789);
    system.run_until_retired(1, 25).expect("program overran budget");
    assert_eq!(system.ram.read(0x300), 123_456_789);
}

#[test]
fn test_memory_operand_through_register_in_25_ticks() {
    let program = assemble_program([
        instr().src(Unit::MemoryOperand).soperand(0x80).dst(Unit::Register).di(4),
        instr().src(Unit::Register).si(4).dst(Unit::MemoryOperand).doperand(0x90),
    ]);
    let mut system = System::with_program(&program);
    system.ram.write(0x80, 0xC0FFEE);
    system.run_until_retired(2, 25).expect("program overran budget");
    assert_eq!(system.ram.read(0x90), 0xC0FFEE);
}

#[test]
fn test_register_pointer_copy_in_100_ticks() {
    let program = assemble_program([
        instr().src(Unit::AbsOperand).soperand(0x200).dst(Unit::Register).di(1),
        instr().src(Unit::AbsOperand).soperand(0x300).dst(Unit::Register).di(2),
        instr().src(Unit::RegisterPointer).si(1).dst(Unit::RegisterPointer).di(2),
    ]);
    let mut system = System::with_program(&program);
    system.ram.write(0x200, 0xABCD);
    system.run_until_retired(3, 100).expect("program overran budget");
    assert_eq!(system.ram.read(0x300), 0xABCD);
}

#[test]
fn test_alu_add_program_in_17_ticks() {
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(666).dst(Unit::AluLeft).di(0),
        instr().src(Unit::AbsImmediate).si(111).dst(Unit::AluRight).di(0),
        instr()
            .src(Unit::AbsImmediate)
            .si(AluOp::Add.to_bits() as u16)
            .dst(Unit::AluOperator)
            .di(0),
        instr().src(Unit::AluResult).si(0).dst(Unit::MemoryImmediate).di(123),
    ]);
    let mut system = System::with_program(&program);
    let ticks = system.run_until_retired(4, 17).expect("program overran budget");
    assert!(ticks <= 17);
    assert_eq!(system.retired, 4);
    assert_eq!(system.ram.read(123), 777);
}

#[test]
fn test_stack_program_preserves_lifo_order() {
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(11).dst(Unit::StackPushPop).di(2),
        instr().src(Unit::AbsImmediate).si(22).dst(Unit::StackPushPop).di(2),
        instr().src(Unit::StackPushPop).si(2).dst(Unit::MemoryImmediate).di(0),
        instr().src(Unit::StackPushPop).si(2).dst(Unit::MemoryImmediate).di(1),
    ]);
    let mut system = System::with_program(&program);
    system.run_until_retired(4, 100).expect("program overran budget");
    assert_eq!(system.ram.read(0), 22);
    assert_eq!(system.ram.read(1), 11);
    assert_eq!(system.core.stacks.depth(2), 0);
}

#[test]
fn test_stack_indexed_access_program() {
    // Push 1, 2, 3; offset 1 from the top is 2. Then overwrite the bottom
    // element through S0[2] and read it back.
    let s0_off1 = 1 << 3;
    let s0_off2 = 2 << 3;
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(1).dst(Unit::StackPushPop).di(0),
        instr().src(Unit::AbsImmediate).si(2).dst(Unit::StackPushPop).di(0),
        instr().src(Unit::AbsImmediate).si(3).dst(Unit::StackPushPop).di(0),
        instr().src(Unit::StackIndex).si(s0_off1).dst(Unit::MemoryImmediate).di(0),
        instr().src(Unit::AbsImmediate).si(9).dst(Unit::StackIndex).di(s0_off2),
        instr().src(Unit::StackIndex).si(s0_off2).dst(Unit::MemoryImmediate).di(1),
    ]);
    let mut system = System::with_program(&program);
    system.run_until_retired(6, 200).expect("program overran budget");
    assert_eq!(system.ram.read(0), 2);
    assert_eq!(system.ram.read(1), 9);
    assert_eq!(system.core.stacks.depth(0), 3);
}

#[test]
fn test_pop_from_empty_stack_stores_zero() {
    let program = assemble_program([
        instr().src(Unit::StackPushPop).si(0).dst(Unit::MemoryImmediate).di(5),
    ]);
    let mut system = System::with_program(&program);
    system.ram.write(5, 123);
    system.run_until_retired(1, 50).expect("program overran budget");
    assert_eq!(system.ram.read(5), 0);
}

#[test]
fn test_jump_skips_instruction() {
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(2).dst(Unit::Pc),
        instr().src(Unit::AbsImmediate).si(1).dst(Unit::MemoryImmediate).di(0),
        instr().src(Unit::AbsImmediate).si(7).dst(Unit::MemoryImmediate).di(1),
    ]);
    let mut system = System::with_program(&program);
    system.run_ticks(30);
    assert_eq!(system.ram.read(0), 0);
    assert_eq!(system.ram.read(1), 7);
}

#[test]
fn test_backward_jump_loops() {
    // Word 2 jumps back to 0; the counter keeps retiring instructions.
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(1).dst(Unit::StackPushPop).di(0),
        instr().src(Unit::AbsImmediate).si(0).dst(Unit::Pc),
    ]);
    let mut system = System::with_program(&program);
    system.run_ticks(300);
    assert!(system.retired >= 10);
    assert!(system.core.stacks.depth(0) >= 5);
}

#[test]
fn test_pc_source_reads_next_instruction_address() {
    let program = assemble_program([instr().src(Unit::Pc).dst(Unit::Register).di(3)]);
    let mut system = System::with_program(&program);
    system.run_until_retired(1, 20).expect("program overran budget");
    assert_eq!(system.core.regs.read(3), 1);
}

#[test]
fn test_serial_byte_reassembly() {
    // Bit-bang 'A' (0x41) at address 0x100: start, 8 data bits lsb first,
    // stop.
    let levels = [0u16, 1, 0, 0, 0, 0, 0, 1, 0, 1];
    let program = assemble_program(levels.map(|bit| {
        instr().src(Unit::AbsImmediate).si(bit).dst(Unit::MemoryImmediate).di(0x100)
    }));
    let mut system = System::with_program(&program);
    system.attach_serial(0x100);
    system.run_until_retired(10, 200).expect("program overran budget");
    let sink = system.serial.as_ref().unwrap();
    assert_eq!(sink.bytes(), b"A");
    assert_eq!(sink.framing_errors(), 0);
}

#[test]
fn test_zero_words_execute_as_no_ops() {
    let mut system = System::with_program(&[]);
    system.run_ticks(30);
    assert!(system.retired >= 5);
    assert!(system.core.pc() >= 5);
}

#[test]
fn test_done_pulse_counts_match_instruction_count() {
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(1).dst(Unit::Register).di(0),
        instr().src(Unit::AbsImmediate).si(2).dst(Unit::Register).di(1),
        instr().src(Unit::AbsImmediate).si(3).dst(Unit::Register).di(2),
    ]);
    let mut system = System::with_program(&program);
    let ticks = system.run_until_retired(3, 20).expect("program overran budget");
    assert_eq!(system.retired, 3);
    // One pulse per instruction, never more than one per tick.
    assert!(ticks >= 3);
}
