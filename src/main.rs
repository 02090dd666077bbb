//! TTA Emulator - CLI Entry Point
//!
//! Commands:
//! - `tta-emu run <image>` - Run a program image
//! - `tta-emu disasm <image>` - Disassemble a program image
//! - `tta-emu test` - Run the built-in self-test

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tta-emu")]
#[command(version = "0.1.0")]
#[command(about = "A cycle-accurate emulator of a transport-triggered 32-bit processor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program image
    Run {
        /// Path to the hex image file to execute
        image: String,
        /// Maximum number of ticks to run (default: 10000)
        #[arg(short, long, default_value = "10000")]
        max_ticks: u64,
        /// Print each retired instruction
        #[arg(short, long)]
        trace: bool,
        /// Dump the final core state as JSON
        #[arg(long)]
        dump_state: bool,
        /// Word address of a bit-banged serial output to decode
        #[arg(long)]
        serial: Option<u32>,
    },
    /// Disassemble a program image to readable text
    Disasm {
        /// Path to the hex image file
        image: String,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { image, max_ticks, trace, dump_state, serial }) => {
            run_image(&image, max_ticks, trace, dump_state, serial);
        }
        Some(Commands::Disasm { image }) => {
            disassemble_image(&image);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("TTA Emulator v0.1.0");
            println!("A transport-triggered architecture emulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_transport();
        }
    }
}

fn run_image(path: &str, max_ticks: u64, trace: bool, dump_state: bool, serial: Option<u32>) {
    use std::path::Path;
    use tta::asm::{disassemble, load_image};
    use tta::System;

    println!("🔧 Running: {}", path);

    let program = match load_image(Path::new(path)) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("❌ Failed to load image: {}", e);
            std::process::exit(1);
        }
    };

    if program.is_empty() {
        eprintln!("❌ Empty image");
        std::process::exit(1);
    }
    println!("📂 Loaded {} words", program.len());

    let listing = disassemble(&program);
    let mut system = System::with_program(&program);
    if let Some(addr) = serial {
        system.attach_serial(addr);
    }

    println!();
    println!("━━━ Execution ━━━");

    while system.ticks < max_ticks {
        let pc = system.core.pc();
        system.tick();
        if trace && system.core.done() {
            let text = listing
                .iter()
                .rev()
                .find(|line| line.addr < pc)
                .map(|line| line.text.as_str())
                .unwrap_or("?");
            println!("{:6}: pc={:04} {}", system.ticks, pc, text);
        }
    }

    println!();
    println!("━━━ Result ━━━");
    println!("Ticks:   {}", system.ticks);
    println!("Retired: {}", system.retired);
    println!("PC:      {}", system.core.pc());
    if let Some(sink) = &system.serial {
        println!("Serial:  {:?}", String::from_utf8_lossy(sink.bytes()));
        if sink.framing_errors() > 0 {
            println!("⚠️  Serial framing errors: {}", sink.framing_errors());
        }
    }

    if dump_state {
        match serde_json::to_string_pretty(&system.core) {
            Ok(json) => {
                println!();
                println!("━━━ Core State ━━━");
                println!("{}", json);
            }
            Err(e) => {
                eprintln!("❌ Failed to serialize state: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn disassemble_image(path: &str) {
    use std::path::Path;
    use tta::asm::{disassemble, load_image};

    println!("📖 Disassembling: {}", path);
    println!();

    let program = match load_image(Path::new(path)) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("❌ Failed to load image: {}", e);
            std::process::exit(1);
        }
    };

    for line in disassemble(&program) {
        let words: Vec<String> = line.words.iter().map(|w| format!("{:08X}", w)).collect();
        println!("{:04}: {:<28} {}", line.addr, words.join(" "), line.text);
    }
}

fn demo_transport() {
    use tta::asm::{assemble_program, disassemble, instr};
    use tta::isa::{AluOp, Unit};
    use tta::System;

    println!("━━━ Transport Demo ━━━");
    println!();

    // 666 + 111, computed by moving values through ALU0.
    let program = assemble_program([
        instr().src(Unit::AbsOperand).soperand(666).dst(Unit::AluLeft).di(0),
        instr().src(Unit::AbsOperand).soperand(111).dst(Unit::AluRight).di(0),
        instr().src(Unit::AbsImmediate).si(AluOp::Add.to_bits() as u16).dst(Unit::AluOperator).di(0),
        instr().src(Unit::AluResult).si(0).dst(Unit::MemoryImmediate).di(0),
    ]);

    println!("Program (4 instructions, {} words):", program.len());
    for line in disassemble(&program) {
        println!("  {}", line.text);
    }
    println!();

    let mut system = System::with_program(&program);
    system.run_ticks(40);

    println!("After {} ticks: mem[0] = {}", system.ticks, system.ram.read(0));
    println!("✓ 666 + 111 = {}", system.ram.read(0));
}

fn run_self_test() {
    use tta::asm::{assemble_program, instr};
    use tta::isa::{AluOp, Unit};
    use tta::System;

    println!("━━━ TTA Emulator Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: immediate to register to memory
    print!("Register/memory copy... ");
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(42).dst(Unit::Register).di(5),
        instr().src(Unit::Register).si(5).dst(Unit::MemoryImmediate).di(16),
    ]);
    let mut system = System::with_program(&program);
    system.run_ticks(8);
    if system.ram.read(16) == 42 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {}, expected 42)", system.ram.read(16));
        failed += 1;
    }

    // Test 2: ALU addition
    print!("ALU addition... ");
    let program = assemble_program([
        instr().src(Unit::AbsOperand).soperand(666).dst(Unit::AluLeft).di(0),
        instr().src(Unit::AbsOperand).soperand(111).dst(Unit::AluRight).di(0),
        instr().src(Unit::AbsImmediate).si(AluOp::Add.to_bits() as u16).dst(Unit::AluOperator).di(0),
        instr().src(Unit::AluResult).si(0).dst(Unit::MemoryImmediate).di(0),
    ]);
    let mut system = System::with_program(&program);
    system.run_ticks(40);
    if system.ram.read(0) == 777 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {}, expected 777)", system.ram.read(0));
        failed += 1;
    }

    // Test 3: stack LIFO order
    print!("Stack push/pop order... ");
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(11).dst(Unit::StackPushPop).di(2),
        instr().src(Unit::AbsImmediate).si(22).dst(Unit::StackPushPop).di(2),
        instr().src(Unit::StackPushPop).si(2).dst(Unit::MemoryImmediate).di(0),
        instr().src(Unit::StackPushPop).si(2).dst(Unit::MemoryImmediate).di(1),
    ]);
    let mut system = System::with_program(&program);
    system.run_ticks(60);
    if system.ram.read(0) == 22 && system.ram.read(1) == 11 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {}, {})", system.ram.read(0), system.ram.read(1));
        failed += 1;
    }

    // Test 4: jump skips an instruction
    print!("Jump over a store... ");
    let program = assemble_program([
        instr().src(Unit::AbsImmediate).si(2).dst(Unit::Pc),
        instr().src(Unit::AbsImmediate).si(1).dst(Unit::MemoryImmediate).di(0),
        instr().src(Unit::AbsImmediate).si(7).dst(Unit::MemoryImmediate).di(1),
    ]);
    let mut system = System::with_program(&program);
    system.run_ticks(30);
    if system.ram.read(0) == 0 && system.ram.read(1) == 7 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {}, {})", system.ram.read(0), system.ram.read(1));
        failed += 1;
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
