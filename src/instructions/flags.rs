//! # Flag Manipulation Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED, CLV. All implicit, two cycles.

use super::retire;
use crate::{Cpu, MemoryBus};

/// CLC - Clear Carry.
pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_c = false;
    retire(cpu, opcode, false);
}

/// SEC - Set Carry.
pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_c = true;
    retire(cpu, opcode, false);
}

/// CLI - Clear Interrupt Disable.
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_i = false;
    retire(cpu, opcode, false);
}

/// SEI - Set Interrupt Disable.
pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_i = true;
    retire(cpu, opcode, false);
}

/// CLD - Clear Decimal Mode.
pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_d = false;
    retire(cpu, opcode, false);
}

/// SED - Set Decimal Mode. The flag is stored but ADC/SBC stay binary.
pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_d = true;
    retire(cpu, opcode, false);
}

/// CLV - Clear Overflow.
pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut Cpu<M>, opcode: u8) {
    cpu.flag_v = false;
    retire(cpu, opcode, false);
}
