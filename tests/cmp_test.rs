//! Tests for the compare instructions: CMP, CPX, CPY never change the
//! register; C is set iff the register is >= the operand.

use dbg65::{Cpu, FlatMemory, MemoryBus};

fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

fn run_imm(cpu: &mut Cpu<FlatMemory>, opcode: u8, value: u8) {
    let pc = cpu.pc();
    cpu.memory_mut().write(pc, opcode);
    cpu.memory_mut().write(pc.wrapping_add(1), value);
    cpu.step(false).unwrap();
}

#[test]
fn test_cmp_greater() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x50);
    run_imm(&mut cpu, 0xC9, 0x30);

    assert_eq!(cpu.a(), 0x50); // register unchanged
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x30);
    run_imm(&mut cpu, 0xC9, 0x30);

    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_less() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x20);
    run_imm(&mut cpu, 0xC9, 0x30);

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n()); // 0x20 - 0x30 = 0xF0
}

#[test]
fn test_cpx_and_cpy() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x80);
    run_imm(&mut cpu, 0xE0, 0x7F);
    assert_eq!(cpu.x(), 0x80);
    assert!(cpu.flag_c());

    cpu.set_y(0x01);
    run_imm(&mut cpu, 0xC0, 0xFF);
    assert_eq!(cpu.y(), 0x01);
    assert!(!cpu.flag_c());
}

#[test]
fn test_cmp_does_not_touch_v() {
    let mut cpu = setup_cpu();
    cpu.set_flag_v(true);
    cpu.set_a(0x00);
    run_imm(&mut cpu, 0xC9, 0x80);
    assert!(cpu.flag_v());
}
