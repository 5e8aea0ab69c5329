//! # dbg65
//!
//! A 6502/65C02 simulator with sim65 paravirtualization and source-level
//! debug support for programs produced by the cc65 toolchain.
//!
//! The crate loads a program image (optionally carrying a sim65 header)
//! into a flat 64 KiB address space, executes it with a table-driven
//! interpreter, traps the sim65 hook addresses to emulate a host ABI
//! (program exit, byte-oriented file I/O, argv delivery), and — when a
//! companion `.dbg` file is available — maps machine addresses to C
//! source lines, function scopes, and local-variable storage.
//!
//! ## Quick Start
//!
//! ```rust
//! use dbg65::{Cpu, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//! memory.write_word(0xFFFC, 0x8000); // reset vector
//! memory.write(0x8000, 0xA9); // LDA #$55
//! memory.write(0x8001, 0x55);
//!
//! let mut cpu = Cpu::new(memory);
//! cpu.step(false).unwrap();
//! assert_eq!(cpu.a(), 0x55);
//! ```
//!
//! Embedders that want the full debugging engine use
//! [`Debugger::launch`] instead of driving the CPU directly: it wires the
//! loader, the paravirtualization host, and the step-mode state machine
//! together and reports progress as [`DebugEvent`]s.
//!
//! ## Modules
//!
//! - `cpu` - CPU state, fetch/decode/execute, breakpoints, trap hook
//! - `memory` - MemoryBus trait and the flat 64 KiB implementation
//! - `opcodes` - opcode metadata table for both CPU variants
//! - `addressing` - addressing mode enumeration
//! - `loader` - sim65 program-image loader
//! - `host` - sim65 paravirtualization host ABI
//! - `debuginfo` - cc65 `.dbg` parser and query layer
//! - `disassembler` - symbol-aware single-instruction disassembly
//! - `debugger` - the slice-driven debug controller

pub mod addressing;
pub mod cpu;
pub mod debugger;
pub mod debuginfo;
pub mod disassembler;
pub mod host;
pub mod loader;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of the public API)
mod instructions;

pub use addressing::AddressingMode;
pub use cpu::{Cpu, NoTraps, RegisterUpdate, Registers, TrapAction, TrapHook};
pub use debugger::{DebugEvent, Debugger, DebuggerOptions, StepMode, StopReason};
pub use debuginfo::{resolve_debug_file, DebugInfo};
pub use disassembler::{disassemble, Disassembly};
pub use host::{OutputRecord, OutputStream, ParavirtHost};
pub use loader::{load_program, LoadError, LoadedProgram};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{CpuType, OpcodeMetadata, OPCODE_TABLE};

use thiserror::Error;

/// Fatal decode errors raised by [`Cpu::step`].
///
/// These end the current slice; the controller surfaces them as a stopped
/// event with a diagnostic and leaves PC at the offending byte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The opcode byte has no defined instruction.
    #[error("undefined opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode {
        /// Address of the opcode.
        pc: u16,
        /// The opcode byte.
        opcode: u8,
    },

    /// A 65C02-only opcode was decoded while emulating the NMOS 6502.
    #[error("opcode ${opcode:02X} ({mnemonic}) at ${pc:04X} requires the 65C02")]
    VariantMismatch {
        /// Address of the opcode.
        pc: u16,
        /// The opcode byte.
        opcode: u8,
        /// Mnemonic of the 65C02 instruction.
        mnemonic: &'static str,
    },
}
