//! # Paravirtualization Host
//!
//! Emulates the sim65 host ABI: execution trapped at the hook addresses
//! $FFF0-$FFF9 is serviced in the host instead of the guest. The hooks
//! cover program exit, byte-oriented file I/O, and argv delivery.
//!
//! ## Calling convention
//!
//! Hooks are reached via JSR, so a handled trap finishes by simulating the
//! RTS that would have executed (the loader pre-fills the hook page with
//! RTS bytes for the hooks nobody services). The last declared parameter
//! of an operation arrives in AX (A = low byte); the rest sit on the cc65
//! software stack and are popped by the handler, nearest first. The
//! software-stack pointer lives in two zero-page bytes at `sp_zp`.
//!
//! ## Suspension
//!
//! A console read with no buffered input cannot complete. The handler
//! leaves the parameters on the software stack, raises the
//! waiting-for-input flag and halts the step; once input is delivered the
//! same trap re-enters and completes.

mod io;

pub use io::{FdTable, IoStrategy};

use std::collections::VecDeque;
use std::fs::OpenOptions;

use log::{debug, warn};

use crate::cpu::{Cpu, TrapAction, TrapHook};
use crate::MemoryBus;

/// First hook address ($FFF0 is reserved and unused).
pub const PARAVIRT_BASE: u16 = 0xFFF0;
/// lseek hook.
pub const PV_LSEEK: u16 = 0xFFF1;
/// remove hook.
pub const PV_REMOVE: u16 = 0xFFF2;
/// errno-mapping hook.
pub const PV_MAP_ERRNO: u16 = 0xFFF3;
/// open hook.
pub const PV_OPEN: u16 = 0xFFF4;
/// close hook.
pub const PV_CLOSE: u16 = 0xFFF5;
/// read hook.
pub const PV_READ: u16 = 0xFFF6;
/// write hook.
pub const PV_WRITE: u16 = 0xFFF7;
/// argv-marshalling hook.
pub const PV_ARGS: u16 = 0xFFF8;
/// exit hook; also the last hook address.
pub const PV_EXIT: u16 = 0xFFF9;
/// Last address of the hook page.
pub const PARAVIRT_TOP: u16 = PV_EXIT;

/// Error marker returned in AX by failed host calls.
const PV_ERR: u16 = 0xFFFF;

/// Cycle cost reported for a handled trap: the RTS that completes it.
const TRAP_CYCLES: u32 = 6;

/// Open-flag bits understood by the open hook.
const O_RDONLY: u16 = 0x01;
const O_WRONLY: u16 = 0x02;
const O_CREAT: u16 = 0x10;
const O_TRUNC: u16 = 0x20;
const O_APPEND: u16 = 0x40;
const O_EXCL: u16 = 0x80;

/// Destination of guest output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    /// fd 1.
    Stdout,
    /// fd 2.
    Stderr,
    /// fd 0 (a cc65 program may write to its input fd).
    Console,
}

/// One chunk of guest output, surfaced to the embedder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Which stream the guest wrote to.
    pub stream: OutputStream,
    /// The raw bytes written.
    pub bytes: Vec<u8>,
}

/// The sim65 host-ABI implementation.
///
/// Install it as the CPU's trap hook via [`Cpu::step_with`]. After a step
/// returns 0 cycles, the controller distinguishes exit from suspension by
/// inspecting [`ParavirtHost::exit_code`] and
/// [`ParavirtHost::is_waiting_for_input`].
#[derive(Debug)]
pub struct ParavirtHost {
    /// Zero-page base of the 16-bit software-stack pointer.
    sp_zp: u8,
    /// Guest file descriptors.
    files: FdTable,
    /// Command-line arguments delivered by the args hook.
    args: Vec<String>,
    /// Unconsumed console input.
    input: VecDeque<u8>,
    /// Set when a console read found the input buffer empty.
    waiting_for_input: bool,
    /// Set by the exit hook; the low byte of the guest's exit code.
    exit_code: Option<u8>,
    /// Guest output pending delivery to the embedder.
    output: VecDeque<OutputRecord>,
}

impl ParavirtHost {
    /// Creates a host with the given software-stack ZP base and argv.
    pub fn new(sp_zp: u8, args: Vec<String>) -> Self {
        Self {
            sp_zp,
            files: FdTable::new(),
            args,
            input: VecDeque::new(),
            waiting_for_input: false,
            exit_code: None,
            output: VecDeque::new(),
        }
    }

    /// Updates the software-stack ZP base (from a freshly loaded image).
    pub fn set_sp_zp(&mut self, sp_zp: u8) {
        self.sp_zp = sp_zp;
    }

    /// The zero-page base of the software-stack pointer.
    pub fn sp_zp(&self) -> u8 {
        self.sp_zp
    }

    /// The exit code recorded by the exit hook, if the program exited.
    pub fn exit_code(&self) -> Option<u8> {
        self.exit_code
    }

    /// True while a console read is stalled waiting for input.
    pub fn is_waiting_for_input(&self) -> bool {
        self.waiting_for_input
    }

    /// Buffers console input and clears the waiting flag; the stalled read
    /// completes when its trap re-enters.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
        if !bytes.is_empty() {
            self.waiting_for_input = false;
        }
    }

    /// Drains pending guest output.
    pub fn take_output(&mut self) -> Vec<OutputRecord> {
        self.output.drain(..).collect()
    }

    /// Closes all host files; called on session teardown.
    pub fn close_all(&mut self) {
        self.files.close_all_files();
    }

    // ========== Calling-convention helpers ==========

    fn get_ax<M: MemoryBus>(cpu: &Cpu<M>) -> u16 {
        (cpu.x() as u16) << 8 | cpu.a() as u16
    }

    fn set_ax<M: MemoryBus>(cpu: &mut Cpu<M>, value: u16) {
        cpu.set_a((value & 0xFF) as u8);
        cpu.set_x((value >> 8) as u8);
    }

    fn soft_sp<M: MemoryBus>(&self, cpu: &Cpu<M>) -> u16 {
        cpu.memory().read_word(self.sp_zp as u16)
    }

    fn set_soft_sp<M: MemoryBus>(&self, cpu: &mut Cpu<M>, value: u16) {
        cpu.memory_mut().write_word(self.sp_zp as u16, value);
    }

    /// Pops `len` little-endian bytes off the software stack.
    fn pop_param<M: MemoryBus>(&self, cpu: &mut Cpu<M>, len: u16) -> u32 {
        let sp = self.soft_sp(cpu);
        let mut value = 0u32;
        for i in (0..len).rev() {
            value = (value << 8) | cpu.memory().read(sp.wrapping_add(i)) as u32;
        }
        self.set_soft_sp(cpu, sp.wrapping_add(len));
        value
    }

    /// Reads a NUL-terminated guest string.
    fn read_string<M: MemoryBus>(cpu: &Cpu<M>, mut addr: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        loop {
            let b = cpu.memory().read(addr);
            if b == 0 {
                break;
            }
            bytes.push(b);
            addr = addr.wrapping_add(1);
        }
        bytes
    }

    /// Completes a handled trap by simulating the RTS back to the caller.
    fn sim_rts<M: MemoryBus>(cpu: &mut Cpu<M>) -> TrapAction {
        let ret = cpu.pull_word();
        cpu.set_pc(ret.wrapping_add(1));
        TrapAction::Handled(TRAP_CYCLES)
    }

    // ========== Hook implementations ==========

    /// lseek(fd, offset, whence): whence in AX, pops offset(4) then fd(2).
    fn pv_lseek<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        let whence = Self::get_ax(cpu);
        let offset = self.pop_param(cpu, 4) as i32;
        let fd = self.pop_param(cpu, 2) as u16;

        let result = match self.files.get_mut(fd) {
            Some(strategy) => match strategy.lseek(offset, whence) {
                Ok(pos) => (pos & 0xFFFF) as u16,
                Err(err) => {
                    warn!("lseek on fd {fd} failed: {err}");
                    PV_ERR
                }
            },
            None => PV_ERR,
        };
        Self::set_ax(cpu, result);
        Self::sim_rts(cpu)
    }

    /// remove(name): name pointer in AX.
    fn pv_remove<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        let name_addr = Self::get_ax(cpu);
        let name = String::from_utf8_lossy(&Self::read_string(cpu, name_addr)).into_owned();

        let result = match std::fs::remove_file(&name) {
            Ok(()) => 0,
            Err(err) => {
                warn!("remove {name:?} failed: {err}");
                PV_ERR
            }
        };
        Self::set_ax(cpu, result);
        Self::sim_rts(cpu)
    }

    /// The errno-mapping hook; this host keeps no guest errno, so it
    /// always reports success.
    fn pv_map_errno<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        Self::set_ax(cpu, 0);
        Self::sim_rts(cpu)
    }

    /// open(name, flags, mode): mode in AX (accepted and ignored), pops
    /// flags(2) then name(2).
    fn pv_open<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        let _mode = Self::get_ax(cpu);
        let flags = self.pop_param(cpu, 2) as u16;
        let name_addr = self.pop_param(cpu, 2) as u16;
        let name = String::from_utf8_lossy(&Self::read_string(cpu, name_addr)).into_owned();

        let mut options = OpenOptions::new();
        options
            .read(flags & O_RDONLY != 0)
            .write(flags & O_WRONLY != 0);
        if flags & O_APPEND != 0 {
            options.append(true);
        }
        if flags & O_TRUNC != 0 {
            options.truncate(true);
        }
        if flags & O_EXCL != 0 {
            options.create_new(true);
        } else if flags & O_CREAT != 0 {
            options.create(true);
        }

        let result = match options.open(&name) {
            Ok(file) => self.files.alloc(file),
            Err(err) => {
                warn!("open {name:?} (flags ${flags:02X}) failed: {err}");
                PV_ERR
            }
        };
        debug!("open {name:?} -> {result}");
        Self::set_ax(cpu, result);
        Self::sim_rts(cpu)
    }

    /// close(fd): fd in AX.
    fn pv_close<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        let fd = Self::get_ax(cpu);
        let result = if self.files.close(fd) { 0 } else { PV_ERR };
        Self::set_ax(cpu, result);
        Self::sim_rts(cpu)
    }

    /// read(fd, buf, count): count in AX, pops buf(2) then fd(2).
    ///
    /// A console read with an empty input buffer suspends: the parameters
    /// stay on the software stack and the step halts at the hook address.
    fn pv_read<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        let count = Self::get_ax(cpu);

        // Peek before popping; a suspended read must leave the stack as-is.
        let sp = self.soft_sp(cpu);
        let buf = cpu.memory().read_word(sp);
        let fd = cpu.memory().read_word(sp.wrapping_add(2));

        if matches!(self.files.get(fd), Some(IoStrategy::Console)) {
            if count > 0 && self.input.is_empty() {
                debug!("console read of {count} bytes: no input, suspending");
                self.waiting_for_input = true;
                return TrapAction::Halt;
            }
            self.pop_param(cpu, 2); // buf
            self.pop_param(cpu, 2); // fd
            let mut delivered = 0u16;
            while delivered < count {
                match self.input.pop_front() {
                    Some(b) => {
                        cpu.memory_mut().write(buf.wrapping_add(delivered), b);
                        delivered += 1;
                    }
                    None => break,
                }
            }
            Self::set_ax(cpu, delivered);
            return Self::sim_rts(cpu);
        }

        self.pop_param(cpu, 2); // buf
        self.pop_param(cpu, 2); // fd
        let result = match self.files.get_mut(fd) {
            Some(strategy) => match strategy.read(count as usize) {
                Ok(bytes) => {
                    for (i, b) in bytes.iter().enumerate() {
                        cpu.memory_mut().write(buf.wrapping_add(i as u16), *b);
                    }
                    bytes.len() as u16
                }
                Err(err) => {
                    warn!("read on fd {fd} failed: {err}");
                    PV_ERR
                }
            },
            None => PV_ERR,
        };
        Self::set_ax(cpu, result);
        Self::sim_rts(cpu)
    }

    /// write(fd, buf, count): count in AX, pops buf(2) then fd(2).
    fn pv_write<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        let count = Self::get_ax(cpu);
        let buf = self.pop_param(cpu, 2) as u16;
        let fd = self.pop_param(cpu, 2) as u16;

        let mut bytes = Vec::with_capacity(count as usize);
        for i in 0..count {
            bytes.push(cpu.memory().read(buf.wrapping_add(i)));
        }

        let result = match self.files.get_mut(fd) {
            Some(IoStrategy::Console) => {
                let stream = match fd {
                    1 => OutputStream::Stdout,
                    2 => OutputStream::Stderr,
                    _ => OutputStream::Console,
                };
                self.output.push_back(OutputRecord { stream, bytes });
                count
            }
            Some(strategy) => match strategy.write(&bytes) {
                Ok(n) => n as u16,
                Err(err) => {
                    warn!("write on fd {fd} failed: {err}");
                    PV_ERR
                }
            },
            None => PV_ERR,
        };
        Self::set_ax(cpu, result);
        Self::sim_rts(cpu)
    }

    /// args(&argv): argv slot address in AX; materializes the argument
    /// vector on the software stack and returns argc in AX.
    ///
    /// Layout after the call, from the new soft-SP upward: argc pointers
    /// (argv[0] first), a NULL pointer, then the string bytes.
    fn pv_args<M: MemoryBus>(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        let argv_slot = Self::get_ax(cpu);
        let mut sp = self.soft_sp(cpu);

        let mut addresses = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            let bytes = arg.as_bytes();
            sp = sp.wrapping_sub(bytes.len() as u16 + 1);
            for (i, b) in bytes.iter().enumerate() {
                cpu.memory_mut().write(sp.wrapping_add(i as u16), *b);
            }
            cpu.memory_mut().write(sp.wrapping_add(bytes.len() as u16), 0);
            addresses.push(sp);
        }

        // Terminating NULL, then the pointers in reverse so argv[0] lands
        // at the lowest address.
        sp = sp.wrapping_sub(2);
        cpu.memory_mut().write_word(sp, 0);
        for addr in addresses.iter().rev() {
            sp = sp.wrapping_sub(2);
            cpu.memory_mut().write_word(sp, *addr);
        }

        self.set_soft_sp(cpu, sp);
        cpu.memory_mut().write_word(argv_slot, sp);
        Self::set_ax(cpu, self.args.len() as u16);
        Self::sim_rts(cpu)
    }
}

impl<M: MemoryBus> TrapHook<M> for ParavirtHost {
    fn pre_step(&mut self, cpu: &mut Cpu<M>) -> TrapAction {
        let pc = cpu.pc();
        if !(PARAVIRT_BASE..=PARAVIRT_TOP).contains(&pc) {
            return TrapAction::Continue;
        }

        match pc {
            PV_LSEEK => self.pv_lseek(cpu),
            PV_REMOVE => self.pv_remove(cpu),
            PV_MAP_ERRNO => self.pv_map_errno(cpu),
            PV_OPEN => self.pv_open(cpu),
            PV_CLOSE => self.pv_close(cpu),
            PV_READ => self.pv_read(cpu),
            PV_WRITE => self.pv_write(cpu),
            PV_ARGS => self.pv_args(cpu),
            PV_EXIT => {
                let code = cpu.a();
                debug!("exit trap: code {code}");
                self.exit_code = Some(code);
                TrapAction::Halt
            }
            // $FFF0 is reserved; fall through to the RTS byte there.
            _ => TrapAction::Continue,
        }
    }
}

impl Drop for ParavirtHost {
    fn drop(&mut self) {
        self.close_all();
    }
}
