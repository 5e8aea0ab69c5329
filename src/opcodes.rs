//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode metadata table that serves as
//! the single source of truth for 6502 and 65C02 instruction information.
//!
//! The table covers:
//! - **151 documented NMOS 6502 instructions**
//! - **27 CMOS 65C02 additions** - gated behind [`CpuType::Wdc65C02`]
//! - **undefined opcodes** - marked with the "???" mnemonic
//!
//! Each opcode entry includes mnemonic, addressing mode, base cycle cost
//! (excluding page-crossing and branch-taken penalties), instruction size
//! in bytes, and the CPU variant that introduced it. Undocumented NMOS
//! opcodes are not modeled; executing one is a decode error.

use crate::addressing::AddressingMode;

/// CPU variant selector.
///
/// sim65 program images carry the variant in their header (0 = 6502,
/// 1 = 65C02). Opcodes tagged [`CpuType::Wdc65C02`] are rejected by the
/// decoder when the current variant is [`CpuType::Mos6502`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuType {
    /// NMOS 6502: the documented instruction set only.
    #[default]
    Mos6502,
    /// WDC 65C02: NMOS set plus the CMOS additions (BRA, STZ, TSB/TRB,
    /// PHX/PLX/PHY/PLY, (zp) addressing, JMP (abs,X), INC/DEC A, extra
    /// BIT modes) and the corrected JMP (ind) page-crossing behavior.
    Wdc65C02,
}

/// Metadata for a single opcode.
///
/// # Fields
///
/// - `mnemonic`: Three-letter instruction name, or "???" for undefined bytes
/// - `addressing_mode`: How the instruction interprets operand bytes
/// - `base_cycles`: Minimum cycle cost (penalties added dynamically)
/// - `size_bytes`: Total instruction size including opcode and operands
/// - `cpu`: The CPU variant required to execute this opcode
///
/// # Examples
///
/// ```
/// use dbg65::{AddressingMode, CpuType, OPCODE_TABLE};
///
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// assert_eq!(lda_imm.cpu, CpuType::Mos6502);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "STA", "???" for undefined opcodes).
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing / branch taken penalties).
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// CPU variant required for this opcode.
    pub cpu: CpuType,
}

impl OpcodeMetadata {
    /// True for table slots that hold no defined instruction.
    pub fn is_undefined(&self) -> bool {
        self.mnemonic == "???"
    }

    /// True if this opcode exists on the given CPU variant.
    pub fn available_on(&self, cpu: CpuType) -> bool {
        !self.is_undefined() && (self.cpu == CpuType::Mos6502 || cpu == CpuType::Wdc65C02)
    }
}

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// Index into the array using the opcode byte to retrieve its metadata.
/// Undefined slots carry the "???" mnemonic, 0 cycles and size 1; executing
/// one raises a decode error rather than emulating undocumented behavior.
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x00
    OpcodeMetadata {
        mnemonic: "BRK",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 7,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x01
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::IndirectX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x02
    UNDEFINED,
    // 0x03
    UNDEFINED,
    // 0x04
    OpcodeMetadata {
        mnemonic: "TSB",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x05
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x06
    OpcodeMetadata {
        mnemonic: "ASL",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x07
    UNDEFINED,
    // 0x08
    OpcodeMetadata {
        mnemonic: "PHP",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 3,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x09
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x0A
    OpcodeMetadata {
        mnemonic: "ASL",
        addressing_mode: AddressingMode::Accumulator,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x0B
    UNDEFINED,
    // 0x0C
    OpcodeMetadata {
        mnemonic: "TSB",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Wdc65C02,
    },
    // 0x0D
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x0E
    OpcodeMetadata {
        mnemonic: "ASL",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x0F
    UNDEFINED,
    // 0x10
    OpcodeMetadata {
        mnemonic: "BPL",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x11
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::IndirectY,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x12
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::ZeroPageIndirect,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x13
    UNDEFINED,
    // 0x14
    OpcodeMetadata {
        mnemonic: "TRB",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x15
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x16
    OpcodeMetadata {
        mnemonic: "ASL",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x17
    UNDEFINED,
    // 0x18
    OpcodeMetadata {
        mnemonic: "CLC",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x19
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x1A
    OpcodeMetadata {
        mnemonic: "INC",
        addressing_mode: AddressingMode::Accumulator,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Wdc65C02,
    },
    // 0x1B
    UNDEFINED,
    // 0x1C
    OpcodeMetadata {
        mnemonic: "TRB",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Wdc65C02,
    },
    // 0x1D
    OpcodeMetadata {
        mnemonic: "ORA",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x1E
    OpcodeMetadata {
        mnemonic: "ASL",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 7,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x1F
    UNDEFINED,
    // 0x20
    OpcodeMetadata {
        mnemonic: "JSR",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x21
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::IndirectX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x22
    UNDEFINED,
    // 0x23
    UNDEFINED,
    // 0x24
    OpcodeMetadata {
        mnemonic: "BIT",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x25
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x26
    OpcodeMetadata {
        mnemonic: "ROL",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x27
    UNDEFINED,
    // 0x28
    OpcodeMetadata {
        mnemonic: "PLP",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 4,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x29
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x2A
    OpcodeMetadata {
        mnemonic: "ROL",
        addressing_mode: AddressingMode::Accumulator,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x2B
    UNDEFINED,
    // 0x2C
    OpcodeMetadata {
        mnemonic: "BIT",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x2D
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x2E
    OpcodeMetadata {
        mnemonic: "ROL",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x2F
    UNDEFINED,
    // 0x30
    OpcodeMetadata {
        mnemonic: "BMI",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x31
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::IndirectY,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x32
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::ZeroPageIndirect,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x33
    UNDEFINED,
    // 0x34
    OpcodeMetadata {
        mnemonic: "BIT",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x35
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x36
    OpcodeMetadata {
        mnemonic: "ROL",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x37
    UNDEFINED,
    // 0x38
    OpcodeMetadata {
        mnemonic: "SEC",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x39
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x3A
    OpcodeMetadata {
        mnemonic: "DEC",
        addressing_mode: AddressingMode::Accumulator,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Wdc65C02,
    },
    // 0x3B
    UNDEFINED,
    // 0x3C
    OpcodeMetadata {
        mnemonic: "BIT",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Wdc65C02,
    },
    // 0x3D
    OpcodeMetadata {
        mnemonic: "AND",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x3E
    OpcodeMetadata {
        mnemonic: "ROL",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 7,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x3F
    UNDEFINED,
    // 0x40
    OpcodeMetadata {
        mnemonic: "RTI",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 6,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x41
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::IndirectX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x42
    UNDEFINED,
    // 0x43
    UNDEFINED,
    // 0x44
    UNDEFINED,
    // 0x45
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x46
    OpcodeMetadata {
        mnemonic: "LSR",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x47
    UNDEFINED,
    // 0x48
    OpcodeMetadata {
        mnemonic: "PHA",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 3,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x49
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x4A
    OpcodeMetadata {
        mnemonic: "LSR",
        addressing_mode: AddressingMode::Accumulator,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x4B
    UNDEFINED,
    // 0x4C
    OpcodeMetadata {
        mnemonic: "JMP",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 3,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x4D
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x4E
    OpcodeMetadata {
        mnemonic: "LSR",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x4F
    UNDEFINED,
    // 0x50
    OpcodeMetadata {
        mnemonic: "BVC",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x51
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::IndirectY,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x52
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::ZeroPageIndirect,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x53
    UNDEFINED,
    // 0x54
    UNDEFINED,
    // 0x55
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x56
    OpcodeMetadata {
        mnemonic: "LSR",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x57
    UNDEFINED,
    // 0x58
    OpcodeMetadata {
        mnemonic: "CLI",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x59
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x5A
    OpcodeMetadata {
        mnemonic: "PHY",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 3,
        size_bytes: 1,
        cpu: CpuType::Wdc65C02,
    },
    // 0x5B
    UNDEFINED,
    // 0x5C
    UNDEFINED,
    // 0x5D
    OpcodeMetadata {
        mnemonic: "EOR",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x5E
    OpcodeMetadata {
        mnemonic: "LSR",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 7,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x5F
    UNDEFINED,
    // 0x60
    OpcodeMetadata {
        mnemonic: "RTS",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 6,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x61
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::IndirectX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x62
    UNDEFINED,
    // 0x63
    UNDEFINED,
    // 0x64
    OpcodeMetadata {
        mnemonic: "STZ",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x65
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x66
    OpcodeMetadata {
        mnemonic: "ROR",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x67
    UNDEFINED,
    // 0x68
    OpcodeMetadata {
        mnemonic: "PLA",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 4,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x69
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x6A
    OpcodeMetadata {
        mnemonic: "ROR",
        addressing_mode: AddressingMode::Accumulator,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x6B
    UNDEFINED,
    // 0x6C
    OpcodeMetadata {
        mnemonic: "JMP",
        addressing_mode: AddressingMode::Indirect,
        base_cycles: 5,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x6D
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x6E
    OpcodeMetadata {
        mnemonic: "ROR",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x6F
    UNDEFINED,
    // 0x70
    OpcodeMetadata {
        mnemonic: "BVS",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x71
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::IndirectY,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x72
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::ZeroPageIndirect,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x73
    UNDEFINED,
    // 0x74
    OpcodeMetadata {
        mnemonic: "STZ",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x75
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x76
    OpcodeMetadata {
        mnemonic: "ROR",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x77
    UNDEFINED,
    // 0x78
    OpcodeMetadata {
        mnemonic: "SEI",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x79
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x7A
    OpcodeMetadata {
        mnemonic: "PLY",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 4,
        size_bytes: 1,
        cpu: CpuType::Wdc65C02,
    },
    // 0x7B
    UNDEFINED,
    // 0x7C
    OpcodeMetadata {
        mnemonic: "JMP",
        addressing_mode: AddressingMode::AbsoluteIndexedIndirect,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Wdc65C02,
    },
    // 0x7D
    OpcodeMetadata {
        mnemonic: "ADC",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x7E
    OpcodeMetadata {
        mnemonic: "ROR",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 7,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x7F
    UNDEFINED,
    // 0x80
    OpcodeMetadata {
        mnemonic: "BRA",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x81
    OpcodeMetadata {
        mnemonic: "STA",
        addressing_mode: AddressingMode::IndirectX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x82
    UNDEFINED,
    // 0x83
    UNDEFINED,
    // 0x84
    OpcodeMetadata {
        mnemonic: "STY",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x85
    OpcodeMetadata {
        mnemonic: "STA",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x86
    OpcodeMetadata {
        mnemonic: "STX",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x87
    UNDEFINED,
    // 0x88
    OpcodeMetadata {
        mnemonic: "DEY",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x89
    OpcodeMetadata {
        mnemonic: "BIT",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x8A
    OpcodeMetadata {
        mnemonic: "TXA",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x8B
    UNDEFINED,
    // 0x8C
    OpcodeMetadata {
        mnemonic: "STY",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x8D
    OpcodeMetadata {
        mnemonic: "STA",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x8E
    OpcodeMetadata {
        mnemonic: "STX",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x8F
    UNDEFINED,
    // 0x90
    OpcodeMetadata {
        mnemonic: "BCC",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x91
    OpcodeMetadata {
        mnemonic: "STA",
        addressing_mode: AddressingMode::IndirectY,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x92
    OpcodeMetadata {
        mnemonic: "STA",
        addressing_mode: AddressingMode::ZeroPageIndirect,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0x93
    UNDEFINED,
    // 0x94
    OpcodeMetadata {
        mnemonic: "STY",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x95
    OpcodeMetadata {
        mnemonic: "STA",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x96
    OpcodeMetadata {
        mnemonic: "STX",
        addressing_mode: AddressingMode::ZeroPageY,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0x97
    UNDEFINED,
    // 0x98
    OpcodeMetadata {
        mnemonic: "TYA",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x99
    OpcodeMetadata {
        mnemonic: "STA",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 5,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x9A
    OpcodeMetadata {
        mnemonic: "TXS",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0x9B
    UNDEFINED,
    // 0x9C
    OpcodeMetadata {
        mnemonic: "STZ",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Wdc65C02,
    },
    // 0x9D
    OpcodeMetadata {
        mnemonic: "STA",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 5,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0x9E
    OpcodeMetadata {
        mnemonic: "STZ",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 5,
        size_bytes: 3,
        cpu: CpuType::Wdc65C02,
    },
    // 0x9F
    UNDEFINED,
    // 0xA0
    OpcodeMetadata {
        mnemonic: "LDY",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xA1
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::IndirectX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xA2
    OpcodeMetadata {
        mnemonic: "LDX",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xA3
    UNDEFINED,
    // 0xA4
    OpcodeMetadata {
        mnemonic: "LDY",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xA5
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xA6
    OpcodeMetadata {
        mnemonic: "LDX",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xA7
    UNDEFINED,
    // 0xA8
    OpcodeMetadata {
        mnemonic: "TAY",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xA9
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xAA
    OpcodeMetadata {
        mnemonic: "TAX",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xAB
    UNDEFINED,
    // 0xAC
    OpcodeMetadata {
        mnemonic: "LDY",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xAD
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xAE
    OpcodeMetadata {
        mnemonic: "LDX",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xAF
    UNDEFINED,
    // 0xB0
    OpcodeMetadata {
        mnemonic: "BCS",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xB1
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::IndirectY,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xB2
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::ZeroPageIndirect,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0xB3
    UNDEFINED,
    // 0xB4
    OpcodeMetadata {
        mnemonic: "LDY",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xB5
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xB6
    OpcodeMetadata {
        mnemonic: "LDX",
        addressing_mode: AddressingMode::ZeroPageY,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xB7
    UNDEFINED,
    // 0xB8
    OpcodeMetadata {
        mnemonic: "CLV",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xB9
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xBA
    OpcodeMetadata {
        mnemonic: "TSX",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xBB
    UNDEFINED,
    // 0xBC
    OpcodeMetadata {
        mnemonic: "LDY",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xBD
    OpcodeMetadata {
        mnemonic: "LDA",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xBE
    OpcodeMetadata {
        mnemonic: "LDX",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xBF
    UNDEFINED,
    // 0xC0
    OpcodeMetadata {
        mnemonic: "CPY",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xC1
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::IndirectX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xC2
    UNDEFINED,
    // 0xC3
    UNDEFINED,
    // 0xC4
    OpcodeMetadata {
        mnemonic: "CPY",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xC5
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xC6
    OpcodeMetadata {
        mnemonic: "DEC",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xC7
    UNDEFINED,
    // 0xC8
    OpcodeMetadata {
        mnemonic: "INY",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xC9
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xCA
    OpcodeMetadata {
        mnemonic: "DEX",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xCB
    UNDEFINED,
    // 0xCC
    OpcodeMetadata {
        mnemonic: "CPY",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xCD
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xCE
    OpcodeMetadata {
        mnemonic: "DEC",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xCF
    UNDEFINED,
    // 0xD0
    OpcodeMetadata {
        mnemonic: "BNE",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xD1
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::IndirectY,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xD2
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::ZeroPageIndirect,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0xD3
    UNDEFINED,
    // 0xD4
    UNDEFINED,
    // 0xD5
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xD6
    OpcodeMetadata {
        mnemonic: "DEC",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xD7
    UNDEFINED,
    // 0xD8
    OpcodeMetadata {
        mnemonic: "CLD",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xD9
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xDA
    OpcodeMetadata {
        mnemonic: "PHX",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 3,
        size_bytes: 1,
        cpu: CpuType::Wdc65C02,
    },
    // 0xDB
    UNDEFINED,
    // 0xDC
    UNDEFINED,
    // 0xDD
    OpcodeMetadata {
        mnemonic: "CMP",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xDE
    OpcodeMetadata {
        mnemonic: "DEC",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 7,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xDF
    UNDEFINED,
    // 0xE0
    OpcodeMetadata {
        mnemonic: "CPX",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xE1
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::IndirectX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xE2
    UNDEFINED,
    // 0xE3
    UNDEFINED,
    // 0xE4
    OpcodeMetadata {
        mnemonic: "CPX",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xE5
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 3,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xE6
    OpcodeMetadata {
        mnemonic: "INC",
        addressing_mode: AddressingMode::ZeroPage,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xE7
    UNDEFINED,
    // 0xE8
    OpcodeMetadata {
        mnemonic: "INX",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xE9
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::Immediate,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xEA
    OpcodeMetadata {
        mnemonic: "NOP",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xEB
    UNDEFINED,
    // 0xEC
    OpcodeMetadata {
        mnemonic: "CPX",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xED
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xEE
    OpcodeMetadata {
        mnemonic: "INC",
        addressing_mode: AddressingMode::Absolute,
        base_cycles: 6,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xEF
    UNDEFINED,
    // 0xF0
    OpcodeMetadata {
        mnemonic: "BEQ",
        addressing_mode: AddressingMode::Relative,
        base_cycles: 2,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xF1
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::IndirectY,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xF2
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::ZeroPageIndirect,
        base_cycles: 5,
        size_bytes: 2,
        cpu: CpuType::Wdc65C02,
    },
    // 0xF3
    UNDEFINED,
    // 0xF4
    UNDEFINED,
    // 0xF5
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 4,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xF6
    OpcodeMetadata {
        mnemonic: "INC",
        addressing_mode: AddressingMode::ZeroPageX,
        base_cycles: 6,
        size_bytes: 2,
        cpu: CpuType::Mos6502,
    },
    // 0xF7
    UNDEFINED,
    // 0xF8
    OpcodeMetadata {
        mnemonic: "SED",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 2,
        size_bytes: 1,
        cpu: CpuType::Mos6502,
    },
    // 0xF9
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::AbsoluteY,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xFA
    OpcodeMetadata {
        mnemonic: "PLX",
        addressing_mode: AddressingMode::Implicit,
        base_cycles: 4,
        size_bytes: 1,
        cpu: CpuType::Wdc65C02,
    },
    // 0xFB
    UNDEFINED,
    // 0xFC
    UNDEFINED,
    // 0xFD
    OpcodeMetadata {
        mnemonic: "SBC",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 4,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xFE
    OpcodeMetadata {
        mnemonic: "INC",
        addressing_mode: AddressingMode::AbsoluteX,
        base_cycles: 7,
        size_bytes: 3,
        cpu: CpuType::Mos6502,
    },
    // 0xFF
    UNDEFINED,
];

/// Placeholder entry for opcode bytes with no defined instruction.
const UNDEFINED: OpcodeMetadata = OpcodeMetadata {
    mnemonic: "???",
    addressing_mode: AddressingMode::Implicit,
    base_cycles: 0,
    size_bytes: 1,
    cpu: CpuType::Mos6502,
};
