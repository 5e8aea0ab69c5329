//! # Debug Controller
//!
//! Drives the CPU in bounded instruction slices between yields to the
//! embedder's scheduler, consulting the step-mode state machine between
//! instructions and translating CPU-level outcomes (breakpoint hits, trap
//! halts, decode errors, input suspension) into debugger events.
//!
//! The controller owns the CPU, the paravirtualization host, and the
//! optional debug-info database. Embedders drain [`DebugEvent`]s after
//! each slice and call the request methods (`resume`, `step_in`,
//! `set_breakpoints`, ...) in response to user actions.

mod eval;
mod frames;
mod step;

pub use eval::{evaluate, EvalError, EvalResult};
pub use frames::{scan_stack, Frame, SyntheticStack};
pub use step::{AddrRange, StepDecision, StepMode};

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use log::debug;

use crate::debuginfo::DebugInfo;
use crate::disassembler::{disassemble, Disassembly};
use crate::host::{OutputStream, ParavirtHost};
use crate::loader::{load_program, LoadError, LoadedProgram};
use crate::{Cpu, FlatMemory, MemoryBus, StepError, OPCODE_TABLE};

/// Why execution stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Initial stop after configuration, before the first instruction.
    Entry,
    /// A breakpoint was hit.
    Breakpoint,
    /// A step request completed.
    Step,
    /// The embedder paused execution.
    Pause,
    /// A fatal decode error; the payload is a diagnostic with PC, the
    /// offending byte, and a context dump.
    Error(String),
}

/// Events surfaced to the embedder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugEvent {
    /// Execution stopped; refresh displays.
    Stopped {
        /// Why it stopped.
        reason: StopReason,
    },
    /// The guest produced output.
    Output {
        /// Stream the guest wrote to.
        stream: OutputStream,
        /// Output text (lossily decoded from the guest bytes).
        text: String,
    },
    /// The guest called the exit trap.
    Terminated {
        /// Guest exit code.
        exit_code: u8,
    },
    /// A console read is stalled until input is fed.
    WaitingForInput,
}

/// One resolved stack-trace entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    /// Frame index; 0 is the current PC.
    pub index: usize,
    /// Frame address (current PC, or the caller's JSR address).
    pub addr: u16,
    /// Display name: the underscore-stripped function-scope name, absent
    /// for library code and for addresses without scope info.
    pub name: Option<String>,
    /// Resolved source path, when line info exists.
    pub source: Option<PathBuf>,
    /// 1-based source line, when line info exists.
    pub line: Option<u32>,
}

/// One resolved variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    /// C-level name.
    pub name: String,
    /// Resolved storage address; absent for storage classes the debugger
    /// does not locate (static, register, extern).
    pub addr: Option<u16>,
    /// Value bytes at the address, little-endian, sized by the type.
    pub bytes: Vec<u8>,
}

/// Launch-time settings.
#[derive(Debug, Clone)]
pub struct DebuggerOptions {
    /// Guest argv (argv[0] is conventionally the program name).
    pub args: Vec<String>,
    /// Directory source paths resolve against.
    pub cwd: PathBuf,
    /// Load-address override for raw images.
    pub load_addr: Option<u16>,
    /// Cap on reconstructed stack frames.
    pub max_frames: usize,
    /// Instructions per slice before yielding.
    pub slice_limit: usize,
}

impl Default for DebuggerOptions {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            cwd: PathBuf::from("."),
            load_addr: None,
            max_frames: 64,
            slice_limit: 1000,
        }
    }
}

/// The debugging engine.
pub struct Debugger {
    cpu: Cpu<FlatMemory>,
    host: ParavirtHost,
    info: Option<DebugInfo>,
    loaded: LoadedProgram,
    step_mode: StepMode,
    events: VecDeque<DebugEvent>,
    running: bool,
    terminated: bool,
    /// Skip the breakpoint check for exactly one instruction, so resuming
    /// from a breakpoint makes progress.
    unblock: bool,
    options: DebuggerOptions,
}

impl Debugger {
    /// Loads a program image and builds the engine around it.
    pub fn launch(
        image: &[u8],
        info: Option<DebugInfo>,
        options: DebuggerOptions,
    ) -> Result<Debugger, LoadError> {
        let mut memory = FlatMemory::new();
        let loaded = load_program(&mut memory, image, options.load_addr)?;

        let mut cpu = Cpu::new(memory);
        cpu.set_cpu_type(loaded.cpu_type);

        let host = ParavirtHost::new(loaded.sp_addr, options.args.clone());

        Ok(Debugger {
            cpu,
            host,
            info,
            loaded,
            step_mode: StepMode::Run,
            events: VecDeque::new(),
            running: false,
            terminated: false,
            unblock: false,
            options,
        })
    }

    // ========== Embedder requests ==========

    /// Completes configuration: reports the entry stop. The embedder's
    /// first `resume` or step request starts execution.
    pub fn configuration_done(&mut self) {
        self.events.push_back(DebugEvent::Stopped {
            reason: StopReason::Entry,
        });
    }

    /// Resumes free-running execution.
    pub fn resume(&mut self) {
        if self.terminated {
            return;
        }
        self.step_mode = StepMode::Run;
        self.unblock = true;
        self.running = true;
    }

    /// Steps one source line, following calls inward.
    pub fn step_in(&mut self) {
        if self.terminated {
            return;
        }
        self.step_mode = StepMode::StepIn {
            ranges: self.line_ranges_at(self.cpu.pc()),
        };
        self.unblock = true;
        self.running = true;
    }

    /// Steps one source line, treating calls as part of the line.
    pub fn step_over(&mut self) {
        if self.terminated {
            return;
        }
        self.step_mode = StepMode::Next {
            ranges: self.line_ranges_at(self.cpu.pc()),
        };
        self.unblock = true;
        self.running = true;
    }

    /// Runs until the current subroutine returns.
    pub fn step_out(&mut self) {
        if self.terminated {
            return;
        }
        self.step_mode = StepMode::StepOut {
            entry_sp: self.cpu.sp(),
        };
        self.unblock = true;
        self.running = true;
    }

    /// Runs to an address (run-to-cursor).
    pub fn run_to(&mut self, target: u16) {
        if self.terminated {
            return;
        }
        self.step_mode = StepMode::RunTo {
            target,
            restore: None,
        };
        self.unblock = true;
        self.running = true;
    }

    /// Pauses between slices.
    pub fn pause(&mut self) {
        if self.terminated || !self.running {
            return;
        }
        self.running = false;
        self.step_mode = StepMode::Run;
        self.events.push_back(DebugEvent::Stopped {
            reason: StopReason::Pause,
        });
    }

    /// Replaces the breakpoints of one source file. The file path is the
    /// breakpoint group (backslashes normalized to `/`). Returns, per
    /// requested line, the address the breakpoint bound to, or `None`
    /// when the line produced no code.
    pub fn set_breakpoints(&mut self, file: &str, lines: &[u32]) -> Vec<Option<u16>> {
        let group = file.replace('\\', "/");
        self.cpu.clear_breakpoints(Some(&group));

        let file_id = self
            .info
            .as_ref()
            .and_then(|info| info.file_by_name(&group))
            .map(|f| f.id);

        lines
            .iter()
            .map(|&line| {
                let addr = file_id.and_then(|id| {
                    self.info
                        .as_ref()
                        .and_then(|info| info.address_for_line(id, line))
                });
                if let Some(addr) = addr {
                    self.cpu.add_breakpoint(addr, &group);
                }
                addr
            })
            .collect()
    }

    /// Buffers console input; a read stalled on empty input completes on
    /// the next slice.
    pub fn feed_input(&mut self, bytes: &[u8]) {
        self.host.push_input(bytes);
    }

    /// Pops the next pending event.
    pub fn poll_event(&mut self) -> Option<DebugEvent> {
        self.events.pop_front()
    }

    // ========== Execution ==========

    /// Runs up to one slice of instructions. Returns true while the
    /// program wants further slices; false when stopped, suspended,
    /// or terminated.
    pub fn slice(&mut self) -> bool {
        if self.terminated || !self.running || self.host.is_waiting_for_input() {
            return false;
        }

        for _ in 0..self.options.slice_limit {
            // Apply the step mode, following transitions at this PC.
            loop {
                match self.step_mode.decide(&self.cpu) {
                    StepDecision::Continue => break,
                    StepDecision::Stop => {
                        self.step_mode = StepMode::Run;
                        self.stop(StopReason::Step);
                        return false;
                    }
                    StepDecision::Become(mode) => {
                        debug!("step mode -> {mode:?}");
                        self.step_mode = mode;
                    }
                }
            }

            let ignore_bp = std::mem::take(&mut self.unblock);
            match self.cpu.step_with(&mut self.host, ignore_bp) {
                Err(err) => {
                    let diagnostic = self.decode_diagnostic(&err);
                    self.step_mode = StepMode::Run;
                    self.stop(StopReason::Error(diagnostic));
                    return false;
                }
                Ok(0) => {
                    if let Some(exit_code) = self.host.exit_code() {
                        self.flush_output();
                        self.events.push_back(DebugEvent::Terminated { exit_code });
                        self.terminated = true;
                        self.running = false;
                        self.host.close_all();
                        return false;
                    }
                    if self.host.is_waiting_for_input() {
                        self.flush_output();
                        self.events.push_back(DebugEvent::WaitingForInput);
                        // `running` stays true; input delivery resumes us.
                        return false;
                    }
                    // Armed breakpoint at PC.
                    self.step_mode = StepMode::Run;
                    self.stop(StopReason::Breakpoint);
                    return false;
                }
                Ok(_) => {}
            }
        }

        self.flush_output();
        true
    }

    fn stop(&mut self, reason: StopReason) {
        self.running = false;
        self.flush_output();
        self.events.push_back(DebugEvent::Stopped { reason });
    }

    fn flush_output(&mut self) {
        for record in self.host.take_output() {
            self.events.push_back(DebugEvent::Output {
                stream: record.stream,
                text: String::from_utf8_lossy(&record.bytes).into_owned(),
            });
        }
    }

    /// Formats the stopped-event diagnostic for a decode error: the error,
    /// the register file, and the bytes around PC.
    fn decode_diagnostic(&self, err: &StepError) -> String {
        let regs = self.cpu.registers();
        let pc = regs.pc;
        let mut dump = String::new();
        for i in 0..8u16 {
            let addr = pc.wrapping_add(i);
            if i > 0 {
                dump.push(' ');
            }
            dump.push_str(&format!("{:02X}", self.cpu.memory().read(addr)));
        }
        format!(
            "{err}; A={:02X} X={:02X} Y={:02X} SP={:02X} P={:02X} | ${pc:04X}: {dump}",
            regs.a, regs.x, regs.y, regs.sp, regs.status
        )
    }

    /// The address ranges of the source line at `pc`: the line's spans
    /// when debug info is present, else just the instruction at `pc` (so
    /// stepping without debug info advances one instruction).
    fn line_ranges_at(&self, pc: u16) -> Vec<AddrRange> {
        if let Some(info) = &self.info {
            if let Some(line) = info.line_for(pc) {
                let ranges: Vec<AddrRange> = line
                    .spans
                    .iter()
                    .filter_map(|id| info.span(*id))
                    .filter(|s| s.abs_start <= 0xFFFF)
                    .map(|s| AddrRange {
                        start: s.abs_start as u16,
                        end: (s.abs_start + s.size).min(0xFFFF) as u16,
                    })
                    .collect();
                if ranges.iter().any(|r| r.contains(pc)) {
                    return ranges;
                }
            }
        }

        let opcode = self.cpu.memory().read(pc);
        let metadata = &OPCODE_TABLE[opcode as usize];
        let len = if metadata.available_on(self.cpu.cpu_type()) {
            metadata.size_bytes as u16
        } else {
            1
        };
        vec![AddrRange {
            start: pc,
            end: pc.wrapping_add(len),
        }]
    }

    // ========== Inspection ==========

    /// Reconstructs the synthetic call stack, raw.
    pub fn synthetic_stack(&self) -> SyntheticStack {
        scan_stack(&self.cpu, self.options.max_frames)
    }

    /// Resolved stack trace: `levels` frames starting at `start`.
    pub fn stack_trace(&self, start: usize, levels: usize) -> Vec<FrameInfo> {
        let stack = self.synthetic_stack();
        stack
            .frames
            .iter()
            .enumerate()
            .skip(start)
            .take(levels)
            .map(|(index, frame)| self.resolve_frame(index, frame.addr))
            .collect()
    }

    fn resolve_frame(&self, index: usize, addr: u16) -> FrameInfo {
        let mut info = FrameInfo {
            index,
            addr,
            name: None,
            source: None,
            line: None,
        };
        let Some(db) = &self.info else {
            return info;
        };

        if let Some(line) = db.line_for(addr) {
            info.line = Some(line.line);
            if let Some(file) = db.file(line.file) {
                info.source = Some(self.resolve_source(&file.name));
            }
        }

        // Function scope name, unless the scope's file came from a library.
        for scope in db.scopes_for(addr) {
            for candidate in db.scope_chain(scope.id) {
                if !candidate.is_function() {
                    continue;
                }
                let in_library = candidate
                    .module
                    .and_then(|m| db.module(m))
                    .and_then(|m| db.file(m.file))
                    .is_some_and(|f| f.is_library);
                if !in_library {
                    let name = candidate.name.trim_start_matches('_');
                    if !name.is_empty() {
                        info.name = Some(name.to_string());
                    }
                }
                return info;
            }
        }
        info
    }

    /// Resolves a recorded source name to a path: absolute names pass
    /// through; relative names join the configured CWD, retrying one
    /// directory up when the file is missing.
    pub fn resolve_source(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        let joined = self.options.cwd.join(path);
        if joined.exists() {
            return joined;
        }
        if let Some(parent) = self.options.cwd.parent() {
            let up = parent.join(path);
            if up.exists() {
                return up;
            }
        }
        joined
    }

    /// The active scope chain at an address, innermost first.
    pub fn scope_chain_at(&self, addr: u16) -> Vec<&crate::debuginfo::Scope> {
        let Some(db) = &self.info else {
            return Vec::new();
        };
        match db.scopes_for(addr).first() {
            Some(leaf) => db.scope_chain(leaf.id),
            None => Vec::new(),
        }
    }

    /// Resolves the variables of a scope against a frame pointer (the
    /// software-stack pointer captured at function entry). Auto variables
    /// read `frame_ptr + offset`; other storage classes are listed
    /// without an address.
    pub fn variables(&self, scope_id: u32, frame_ptr: u16) -> Vec<VariableInfo> {
        let Some(db) = &self.info else {
            return Vec::new();
        };
        db.variables_for(scope_id)
            .into_iter()
            .map(|csym| {
                if csym.storage == crate::debuginfo::StorageClass::Auto {
                    let addr = frame_ptr.wrapping_add(csym.offset as u16);
                    let size = csym
                        .type_id
                        .and_then(|id| db.type_info(id))
                        .and_then(|t| t.size)
                        .unwrap_or(1)
                        .min(8);
                    let bytes = (0..size as u16)
                        .map(|i| self.cpu.memory().read(addr.wrapping_add(i)))
                        .collect();
                    VariableInfo {
                        name: csym.name.clone(),
                        addr: Some(addr),
                        bytes,
                    }
                } else {
                    VariableInfo {
                        name: csym.name.clone(),
                        addr: None,
                        bytes: Vec::new(),
                    }
                }
            })
            .collect()
    }

    /// The current software-stack pointer (the C frame pointer at a stop
    /// directly after function entry).
    pub fn frame_pointer(&self) -> u16 {
        self.cpu.memory().read_word(self.host.sp_zp() as u16)
    }

    /// Evaluates a watch expression against the current state.
    pub fn evaluate(&self, expr: &str) -> Result<EvalResult, EvalError> {
        eval::evaluate(expr, &self.cpu, self.info.as_ref())
    }

    /// Reads guest memory relative to a debug-info segment.
    pub fn read_memory(&self, seg_id: u32, offset: u32, count: usize) -> Option<Vec<u8>> {
        let seg = self.info.as_ref()?.segment(seg_id)?;
        let base = seg.start.checked_add(offset)?;
        if base > 0xFFFF {
            return None;
        }
        let base = base as u16;
        Some(
            (0..count as u16)
                .map(|i| self.cpu.memory().read(base.wrapping_add(i)))
                .collect(),
        )
    }

    /// Disassembles the instruction at `addr` with symbol substitution.
    pub fn disassemble_at(&self, addr: u16) -> Disassembly {
        disassemble(
            self.cpu.memory(),
            addr,
            self.info.as_ref(),
            self.cpu.cpu_type(),
        )
    }

    // ========== Accessors ==========

    /// The CPU.
    pub fn cpu(&self) -> &Cpu<FlatMemory> {
        &self.cpu
    }

    /// The CPU, mutably (register edits from the UI).
    pub fn cpu_mut(&mut self) -> &mut Cpu<FlatMemory> {
        &mut self.cpu
    }

    /// The paravirtualization host.
    pub fn host(&self) -> &ParavirtHost {
        &self.host
    }

    /// The debug-info database, when one was loaded.
    pub fn debug_info(&self) -> Option<&DebugInfo> {
        self.info.as_ref()
    }

    /// Load-time facts about the program image.
    pub fn loaded(&self) -> LoadedProgram {
        self.loaded
    }

    /// True once the guest has exited.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// True while execution is live (between a resume/step request and
    /// the next stop).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The current step mode.
    pub fn step_mode(&self) -> &StepMode {
        &self.step_mode
    }
}
