//! # CPU State and Execution
//!
//! This module contains the [`Cpu`] struct representing 6502/65C02 processor
//! state and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of the next instruction
//! - **Stack pointer** (SP): 8-bit offset into the stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Cycle counter**: monotonically increasing cycle count
//! - **Breakpoints**: address -> set of group tags
//!
//! ## Execution Model
//!
//! `step()` executes one instruction and returns the cycles consumed. Before
//! fetching, the CPU consults its breakpoint set and then an optional
//! [`TrapHook`]; these are its only cooperation channels with the outside
//! world. The hook is how the paravirtualization host intercepts execution
//! at the sim65 hook addresses.

use std::collections::{HashMap, HashSet};

use crate::opcodes::CpuType;
use crate::{MemoryBus, StepError, OPCODE_TABLE};

/// Carry flag bit in the packed status byte.
pub const FLAG_C: u8 = 0x01;
/// Zero flag bit.
pub const FLAG_Z: u8 = 0x02;
/// Interrupt-disable flag bit.
pub const FLAG_I: u8 = 0x04;
/// Decimal flag bit. Decimal arithmetic is not implemented; with D set,
/// ADC/SBC silently behave as in binary mode.
pub const FLAG_D: u8 = 0x08;
/// Break flag bit.
pub const FLAG_B: u8 = 0x10;
/// Unused bit; reads back as 1 in every packed status byte.
pub const FLAG_U: u8 = 0x20;
/// Overflow flag bit.
pub const FLAG_V: u8 = 0x40;
/// Negative flag bit.
pub const FLAG_N: u8 = 0x80;

/// Address of the reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Address of the IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;
/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Outcome of a [`TrapHook`] consultation, performed before each fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapAction {
    /// PC is not a trapped address; fetch and execute normally.
    Continue,
    /// The hook performed the operation (mutating registers and memory as
    /// needed) and the step is complete. Carries the cycles to report.
    Handled(u32),
    /// Abort the step with zero cycles and no state change at this PC.
    /// Used to signal program exit and to suspend on a blocking read.
    Halt,
}

/// Hook consulted before each instruction fetch.
///
/// The hook may mutate registers and memory freely. Returning
/// [`TrapAction::Halt`] aborts the step; the CPU stays at the current PC so
/// the trapped operation can be re-entered later.
pub trait TrapHook<M: MemoryBus> {
    /// Called with the CPU about to fetch at `cpu.pc()`.
    fn pre_step(&mut self, cpu: &mut Cpu<M>) -> TrapAction;
}

/// A no-op hook for running without paravirtualization.
pub struct NoTraps;

impl<M: MemoryBus> TrapHook<M> for NoTraps {
    fn pre_step(&mut self, _cpu: &mut Cpu<M>) -> TrapAction {
        TrapAction::Continue
    }
}

/// A plain-old-data snapshot of the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (offset into the stack page).
    pub sp: u8,
    /// Packed status byte; the U bit is always 1.
    pub status: u8,
    /// Program counter.
    pub pc: u16,
}

/// A partial register write; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterUpdate {
    /// New accumulator value.
    pub a: Option<u8>,
    /// New X value.
    pub x: Option<u8>,
    /// New Y value.
    pub y: Option<u8>,
    /// New stack pointer value.
    pub sp: Option<u8>,
    /// New packed status byte (U is forced to 1 on store).
    pub status: Option<u8>,
    /// New program counter value.
    pub pc: Option<u16>,
}

/// 6502/65C02 CPU state and execution context.
///
/// The struct is generic over the memory implementation via the
/// [`MemoryBus`] trait.
///
/// # Examples
///
/// ```
/// use dbg65::{Cpu, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write_word(0xFFFC, 0x8000); // reset vector
/// memory.write(0x8000, 0xA9); // LDA #$55
/// memory.write(0x8001, 0x55);
///
/// let mut cpu = Cpu::new(memory);
/// let cycles = cpu.step(false).unwrap();
/// assert_eq!(cycles, 2);
/// assert_eq!(cpu.a(), 0x55);
/// assert_eq!(cpu.pc(), 0x8002);
/// ```
pub struct Cpu<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives the full stack address)
    pub(crate) sp: u8,

    /// Negative flag (bit 7 of the last result)
    pub(crate) flag_n: bool,

    /// Overflow flag (signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag
    pub(crate) flag_b: bool,

    /// Decimal mode flag (stored but not honored by ADC/SBC)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag
    pub(crate) flag_i: bool,

    /// Zero flag
    pub(crate) flag_z: bool,

    /// Carry flag
    pub(crate) flag_c: bool,

    /// CPU variant; 65C02-only opcodes are rejected under Mos6502
    pub(crate) cpu_type: CpuType,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Breakpoints: address -> non-empty set of group tags
    breakpoints: HashMap<u16, HashSet<String>>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a new CPU over the given memory bus and applies the power-on
    /// reset state (see [`Cpu::reset`]).
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0xFF,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: true,
            flag_z: false,
            flag_c: false,
            cpu_type: CpuType::Mos6502,
            cycles: 0,
            breakpoints: HashMap::new(),
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Applies the reset state: A = X = Y = 0, SP = $FF, P = U | I,
    /// cycles = 0, PC loaded from the reset vector at $FFFC.
    ///
    /// A fresh memory holds zeros, so without a reset vector PC becomes 0;
    /// that is treated as a valid program pointer.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFF;
        self.flag_n = false;
        self.flag_v = false;
        self.flag_b = false;
        self.flag_d = false;
        self.flag_i = true;
        self.flag_z = false;
        self.flag_c = false;
        self.cycles = 0;
        self.pc = self.memory.read_word(RESET_VECTOR);
    }

    /// Executes one instruction without a trap hook.
    ///
    /// See [`Cpu::step_with`] for the full semantics.
    pub fn step(&mut self, ignore_bp: bool) -> Result<u32, StepError> {
        self.step_with(&mut NoTraps, ignore_bp)
    }

    /// Executes one instruction, consulting `hook` before the fetch.
    ///
    /// Semantics, in order:
    /// 1. If `ignore_bp` is false and a breakpoint is armed at PC, return
    ///    `Ok(0)` without executing.
    /// 2. Consult the hook. [`TrapAction::Halt`] aborts with `Ok(0)`;
    ///    [`TrapAction::Handled`] completes the step with the reported
    ///    cycles; [`TrapAction::Continue`] falls through to the fetch.
    /// 3. Fetch the opcode at PC, decode via the opcode table, fetch
    ///    operands per the addressing mode, execute, and return the cycles
    ///    added.
    ///
    /// An undefined opcode, or a 65C02-only opcode under the 6502 variant,
    /// is a fatal decode error; PC is left pointing at the offending byte.
    pub fn step_with<H: TrapHook<M>>(
        &mut self,
        hook: &mut H,
        ignore_bp: bool,
    ) -> Result<u32, StepError> {
        if !ignore_bp && self.breakpoint_armed(self.pc) {
            return Ok(0);
        }

        match hook.pre_step(self) {
            TrapAction::Halt => return Ok(0),
            TrapAction::Handled(cycles) => {
                self.cycles += cycles as u64;
                return Ok(cycles);
            }
            TrapAction::Continue => {}
        }

        let pc = self.pc;
        let opcode = self.memory.read(pc);
        let metadata = &OPCODE_TABLE[opcode as usize];

        if metadata.is_undefined() {
            return Err(StepError::IllegalOpcode { pc, opcode });
        }
        if !metadata.available_on(self.cpu_type) {
            return Err(StepError::VariantMismatch {
                pc,
                opcode,
                mnemonic: metadata.mnemonic,
            });
        }

        let before = self.cycles;
        self.execute(opcode, metadata.mnemonic);
        Ok((self.cycles - before) as u32)
    }

    /// Dispatches one decoded instruction to its implementation.
    fn execute(&mut self, opcode: u8, mnemonic: &'static str) {
        use crate::instructions::*;

        match mnemonic {
            "ADC" => alu::execute_adc(self, opcode),
            "AND" => alu::execute_and(self, opcode),
            "ASL" => shifts::execute_asl(self, opcode),
            "BCC" => branches::execute_branch(self, opcode),
            "BCS" => branches::execute_branch(self, opcode),
            "BEQ" => branches::execute_branch(self, opcode),
            "BIT" => alu::execute_bit(self, opcode),
            "BMI" => branches::execute_branch(self, opcode),
            "BNE" => branches::execute_branch(self, opcode),
            "BPL" => branches::execute_branch(self, opcode),
            "BRA" => branches::execute_branch(self, opcode),
            "BRK" => control::execute_brk(self, opcode),
            "BVC" => branches::execute_branch(self, opcode),
            "BVS" => branches::execute_branch(self, opcode),
            "CLC" => flags::execute_clc(self, opcode),
            "CLD" => flags::execute_cld(self, opcode),
            "CLI" => flags::execute_cli(self, opcode),
            "CLV" => flags::execute_clv(self, opcode),
            "CMP" => alu::execute_cmp(self, opcode),
            "CPX" => alu::execute_cpx(self, opcode),
            "CPY" => alu::execute_cpy(self, opcode),
            "DEC" => inc_dec::execute_dec(self, opcode),
            "DEX" => inc_dec::execute_dex(self, opcode),
            "DEY" => inc_dec::execute_dey(self, opcode),
            "EOR" => alu::execute_eor(self, opcode),
            "INC" => inc_dec::execute_inc(self, opcode),
            "INX" => inc_dec::execute_inx(self, opcode),
            "INY" => inc_dec::execute_iny(self, opcode),
            "JMP" => control::execute_jmp(self, opcode),
            "JSR" => control::execute_jsr(self, opcode),
            "LDA" => load_store::execute_lda(self, opcode),
            "LDX" => load_store::execute_ldx(self, opcode),
            "LDY" => load_store::execute_ldy(self, opcode),
            "LSR" => shifts::execute_lsr(self, opcode),
            "NOP" => control::execute_nop(self, opcode),
            "ORA" => alu::execute_ora(self, opcode),
            "PHA" => stack::execute_pha(self, opcode),
            "PHP" => stack::execute_php(self, opcode),
            "PHX" => stack::execute_phx(self, opcode),
            "PHY" => stack::execute_phy(self, opcode),
            "PLA" => stack::execute_pla(self, opcode),
            "PLP" => stack::execute_plp(self, opcode),
            "PLX" => stack::execute_plx(self, opcode),
            "PLY" => stack::execute_ply(self, opcode),
            "ROL" => shifts::execute_rol(self, opcode),
            "ROR" => shifts::execute_ror(self, opcode),
            "RTI" => control::execute_rti(self, opcode),
            "RTS" => control::execute_rts(self, opcode),
            "SBC" => alu::execute_sbc(self, opcode),
            "SEC" => flags::execute_sec(self, opcode),
            "SED" => flags::execute_sed(self, opcode),
            "SEI" => flags::execute_sei(self, opcode),
            "STA" => load_store::execute_sta(self, opcode),
            "STX" => load_store::execute_stx(self, opcode),
            "STY" => load_store::execute_sty(self, opcode),
            "STZ" => load_store::execute_stz(self, opcode),
            "TAX" => transfer::execute_tax(self, opcode),
            "TAY" => transfer::execute_tay(self, opcode),
            "TRB" => alu::execute_trb(self, opcode),
            "TSB" => alu::execute_tsb(self, opcode),
            "TSX" => transfer::execute_tsx(self, opcode),
            "TXA" => transfer::execute_txa(self, opcode),
            "TXS" => transfer::execute_txs(self, opcode),
            "TYA" => transfer::execute_tya(self, opcode),
            other => unreachable!("decoded mnemonic {other} has no implementation"),
        }
    }

    // ========== Breakpoints ==========

    /// Arms a breakpoint at `addr` under the given group tag.
    ///
    /// Group tags are opaque strings; the same address may be armed by
    /// several groups and stays armed while any group holds it.
    pub fn add_breakpoint(&mut self, addr: u16, group: &str) {
        self.breakpoints
            .entry(addr)
            .or_default()
            .insert(group.to_string());
    }

    /// Removes the breakpoint at `addr` for the given group tag.
    pub fn remove_breakpoint(&mut self, addr: u16, group: &str) {
        if let Some(groups) = self.breakpoints.get_mut(&addr) {
            groups.remove(group);
            if groups.is_empty() {
                self.breakpoints.remove(&addr);
            }
        }
    }

    /// Removes all breakpoints belonging to `group`, or every breakpoint
    /// when `group` is `None`.
    pub fn clear_breakpoints(&mut self, group: Option<&str>) {
        match group {
            Some(tag) => {
                self.breakpoints.retain(|_, groups| {
                    groups.remove(tag);
                    !groups.is_empty()
                });
            }
            None => self.breakpoints.clear(),
        }
    }

    /// True if any group has a breakpoint armed at `addr`.
    pub fn breakpoint_armed(&self, addr: u16) -> bool {
        self.breakpoints.contains_key(&addr)
    }

    // ========== Register access ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP; the stack grows downward.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the total number of CPU cycles executed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the current CPU variant.
    pub fn cpu_type(&self) -> CpuType {
        self.cpu_type
    }

    /// Selects the CPU variant. 65C02-only opcodes decode only under
    /// [`CpuType::Wdc65C02`].
    pub fn set_cpu_type(&mut self, cpu_type: CpuType) {
        self.cpu_type = cpu_type;
    }

    /// Returns the status register as a packed byte (NV-BDIZC, U always 1).
    pub fn status(&self) -> u8 {
        let mut status = FLAG_U;
        if self.flag_n {
            status |= FLAG_N;
        }
        if self.flag_v {
            status |= FLAG_V;
        }
        if self.flag_b {
            status |= FLAG_B;
        }
        if self.flag_d {
            status |= FLAG_D;
        }
        if self.flag_i {
            status |= FLAG_I;
        }
        if self.flag_z {
            status |= FLAG_Z;
        }
        if self.flag_c {
            status |= FLAG_C;
        }
        status
    }

    /// Unpacks a status byte into the flag fields. The U bit is ignored on
    /// store and reads back as 1.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & FLAG_N != 0;
        self.flag_v = value & FLAG_V != 0;
        self.flag_b = value & FLAG_B != 0;
        self.flag_d = value & FLAG_D != 0;
        self.flag_i = value & FLAG_I != 0;
        self.flag_z = value & FLAG_Z != 0;
        self.flag_c = value & FLAG_C != 0;
    }

    /// Takes a register snapshot.
    pub fn registers(&self) -> Registers {
        Registers {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            status: self.status(),
            pc: self.pc,
        }
    }

    /// Applies a partial register update; `None` fields are untouched.
    pub fn set_registers(&mut self, update: &RegisterUpdate) {
        if let Some(a) = update.a {
            self.a = a;
        }
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(sp) = update.sp {
            self.sp = sp;
        }
        if let Some(status) = update.status {
            self.set_status(status);
        }
        if let Some(pc) = update.pc {
            self.pc = pc;
        }
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    /// Sets the accumulator register value.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register value.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register value.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter value.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer value.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Sets the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Stack helpers ==========

    /// Pushes a byte onto the hardware stack.
    pub fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE + self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pulls a byte from the hardware stack.
    pub fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE + self.sp as u16)
    }

    /// Pushes a 16-bit word, high byte first, so the word reads back
    /// little-endian in memory.
    pub fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push((value & 0xFF) as u8);
    }

    /// Pulls a 16-bit word pushed by [`Cpu::push_word`].
    pub fn pull_word(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    /// Pulls a status byte with the pull-from-stack rules applied: B is
    /// forced to 0 and U to 1.
    pub(crate) fn pull_status(&mut self) {
        let value = self.pull();
        self.set_status(value & !FLAG_B);
    }

    // ========== Addressing-mode helpers ==========

    /// Computes the effective address for a memory-addressed instruction.
    ///
    /// Returns the address and whether an index crossed a page boundary
    /// (relevant for the +1 cycle penalty on read instructions).
    pub(crate) fn effective_address(&self, mode: crate::AddressingMode) -> (u16, bool) {
        use crate::AddressingMode::*;

        match mode {
            ZeroPage => (self.memory.read(self.pc.wrapping_add(1)) as u16, false),
            ZeroPageX => {
                let base = self.memory.read(self.pc.wrapping_add(1));
                (base.wrapping_add(self.x) as u16, false)
            }
            ZeroPageY => {
                let base = self.memory.read(self.pc.wrapping_add(1));
                (base.wrapping_add(self.y) as u16, false)
            }
            Absolute => (self.memory.read_word(self.pc.wrapping_add(1)), false),
            AbsoluteX => {
                let base = self.memory.read_word(self.pc.wrapping_add(1));
                let addr = base.wrapping_add(self.x as u16);
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }
            AbsoluteY => {
                let base = self.memory.read_word(self.pc.wrapping_add(1));
                let addr = base.wrapping_add(self.y as u16);
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }
            IndirectX => {
                let zp = self
                    .memory
                    .read(self.pc.wrapping_add(1))
                    .wrapping_add(self.x);
                (self.read_zp_word(zp), false)
            }
            IndirectY => {
                let zp = self.memory.read(self.pc.wrapping_add(1));
                let base = self.read_zp_word(zp);
                let addr = base.wrapping_add(self.y as u16);
                (addr, (base & 0xFF00) != (addr & 0xFF00))
            }
            ZeroPageIndirect => {
                let zp = self.memory.read(self.pc.wrapping_add(1));
                (self.read_zp_word(zp), false)
            }
            Implicit | Accumulator | Immediate | Relative | Indirect
            | AbsoluteIndexedIndirect => {
                unreachable!("no effective address for {mode:?}")
            }
        }
    }

    /// Fetches the operand value for a read instruction.
    ///
    /// Returns the value and the page-crossed marker from the address
    /// computation.
    pub(crate) fn operand_value(&self, mode: crate::AddressingMode) -> (u8, bool) {
        if mode == crate::AddressingMode::Immediate {
            return (self.memory.read(self.pc.wrapping_add(1)), false);
        }
        let (addr, crossed) = self.effective_address(mode);
        (self.memory.read(addr), crossed)
    }

    /// Reads a 16-bit pointer from the zero page; the second byte wraps
    /// within the zero page.
    fn read_zp_word(&self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16) as u16;
        let hi = self.memory.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn setup_cpu() -> Cpu<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.write_word(RESET_VECTOR, 0x8000);
        Cpu::new(memory)
    }

    #[test]
    fn test_reset_state() {
        let cpu = setup_cpu();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.status(), FLAG_U | FLAG_I);
    }

    #[test]
    fn test_missing_reset_vector_yields_pc_zero() {
        let cpu = Cpu::new(FlatMemory::new());
        assert_eq!(cpu.pc(), 0x0000);
    }

    #[test]
    fn test_status_round_trip() {
        let mut cpu = setup_cpu();

        cpu.set_status(0xFF);
        assert_eq!(cpu.status(), 0xFF);

        cpu.set_status(0x00);
        // U reads back as 1 no matter what was stored
        assert_eq!(cpu.status(), FLAG_U);
    }

    #[test]
    fn test_pull_status_clears_break() {
        let mut cpu = setup_cpu();

        cpu.push(0xFF);
        cpu.pull_status();
        assert!(!cpu.flag_b());
        assert_eq!(cpu.status(), 0xFF & !FLAG_B);
    }

    #[test]
    fn test_stack_wraps() {
        let mut cpu = setup_cpu();

        cpu.set_sp(0x00);
        cpu.push(0xAB);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory().read(0x0100), 0xAB);
        assert_eq!(cpu.pull(), 0xAB);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_breakpoint_blocks_step() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0xEA); // NOP

        cpu.add_breakpoint(0x8000, "main.c");
        assert_eq!(cpu.step(false).unwrap(), 0);
        assert_eq!(cpu.pc(), 0x8000);

        // ignore_bp executes through the breakpoint
        assert_eq!(cpu.step(true).unwrap(), 2);
        assert_eq!(cpu.pc(), 0x8001);
    }

    #[test]
    fn test_breakpoint_groups_are_independent() {
        let mut cpu = setup_cpu();

        cpu.add_breakpoint(0x9000, "a.c");
        cpu.add_breakpoint(0x9000, "b.c");
        cpu.remove_breakpoint(0x9000, "a.c");
        assert!(cpu.breakpoint_armed(0x9000));
        cpu.remove_breakpoint(0x9000, "b.c");
        assert!(!cpu.breakpoint_armed(0x9000));
    }

    #[test]
    fn test_clear_breakpoints_by_group() {
        let mut cpu = setup_cpu();

        cpu.add_breakpoint(0x9000, "a.c");
        cpu.add_breakpoint(0x9001, "a.c");
        cpu.add_breakpoint(0x9001, "b.c");
        cpu.clear_breakpoints(Some("a.c"));
        assert!(!cpu.breakpoint_armed(0x9000));
        assert!(cpu.breakpoint_armed(0x9001));
        cpu.clear_breakpoints(None);
        assert!(!cpu.breakpoint_armed(0x9001));
    }

    #[test]
    fn test_illegal_opcode_is_decode_error() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x02);

        match cpu.step(false) {
            Err(StepError::IllegalOpcode { pc, opcode }) => {
                assert_eq!(pc, 0x8000);
                assert_eq!(opcode, 0x02);
            }
            other => panic!("expected IllegalOpcode, got {other:?}"),
        }
        // PC still points at the offending byte
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn test_cmos_opcode_rejected_on_nmos() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x64); // STZ zp, 65C02 only

        match cpu.step(false) {
            Err(StepError::VariantMismatch { opcode, .. }) => assert_eq!(opcode, 0x64),
            other => panic!("expected VariantMismatch, got {other:?}"),
        }

        cpu.set_cpu_type(CpuType::Wdc65C02);
        assert!(cpu.step(false).is_ok());
    }

    #[test]
    fn test_partial_register_update() {
        let mut cpu = setup_cpu();

        cpu.set_registers(&RegisterUpdate {
            a: Some(0x12),
            pc: Some(0x1234),
            ..Default::default()
        });
        assert_eq!(cpu.a(), 0x12);
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.sp(), 0xFF);
    }
}
