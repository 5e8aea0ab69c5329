//! Tests for the SBC (Subtract with Carry) instruction, defined as ADC of
//! the one's complement.

use dbg65::{Cpu, FlatMemory, MemoryBus};

fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

fn sbc_imm(cpu: &mut Cpu<FlatMemory>, value: u8) {
    let pc = cpu.pc();
    cpu.memory_mut().write(pc, 0xE9);
    cpu.memory_mut().write(pc.wrapping_add(1), value);
    cpu.step(false).unwrap();
}

#[test]
fn test_sbc_with_carry_set_is_plain_subtract() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x30);
    cpu.set_flag_c(true);
    sbc_imm(&mut cpu, 0x10);

    assert_eq!(cpu.a(), 0x20);
    assert!(cpu.flag_c()); // no borrow
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_sbc_without_carry_subtracts_one_more() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x30);
    sbc_imm(&mut cpu, 0x10);

    assert_eq!(cpu.a(), 0x1F);
}

#[test]
fn test_sbc_borrow_clears_carry() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x10);
    cpu.set_flag_c(true);
    sbc_imm(&mut cpu, 0x20);

    assert_eq!(cpu.a(), 0xF0);
    assert!(!cpu.flag_c()); // borrow occurred
    assert!(cpu.flag_n());
}

#[test]
fn test_sbc_zero_result() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x42);
    cpu.set_flag_c(true);
    sbc_imm(&mut cpu, 0x42);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_signed_overflow() {
    // 0x50 - 0xB0 = positive minus negative overflowing to negative
    let mut cpu = setup_cpu();
    cpu.set_a(0x50);
    cpu.set_flag_c(true);
    sbc_imm(&mut cpu, 0xB0);

    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
}
