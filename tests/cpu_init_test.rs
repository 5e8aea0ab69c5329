//! Tests for reset behavior and the basic fetch-execute contract.

use dbg65::{Cpu, FlatMemory, MemoryBus};

fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

#[test]
fn test_reset_loads_vector_and_clears_state() {
    let cpu = setup_cpu();

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.y(), 0x00);
    assert_eq!(cpu.cycles(), 0);

    assert!(cpu.flag_i());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_b());
    assert!(!cpu.flag_d());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
}

#[test]
fn test_reset_rereads_vector() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write_word(0xFFFC, 0x1234);
    cpu.set_a(0x55);
    cpu.set_sp(0x10);
    cpu.reset();

    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_lda_immediate_after_reset() {
    // Memory: reset vector $FFFC=$00, $FFFD=$80; $8000=$A9, $8001=$55.
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0xA9);
    cpu.memory_mut().write(0x8001, 0x55);

    let cycles = cpu.step(false).unwrap();

    assert_eq!(cpu.a(), 0x55);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cycles, 2);
}

#[test]
fn test_status_u_bit_always_reads_one() {
    let mut cpu = setup_cpu();
    cpu.set_status(0x00);
    assert_eq!(cpu.status() & 0x20, 0x20);
}
