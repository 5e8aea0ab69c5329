//! Debug-controller tests: slice-driven execution, step modes, breakpoint
//! groups, synthetic stack frames, the waiting-for-input flow, and the
//! inspection requests.

use dbg65::{
    DebugEvent, DebugInfo, Debugger, DebuggerOptions, MemoryBus, StepMode, StopReason,
};

/// Builds a sim65 program image around `payload`.
fn sim65_image(load: u16, reset: u16, sp: u8, cpu: u8, payload: &[u8]) -> Vec<u8> {
    let mut image = Vec::new();
    image.extend_from_slice(b"sim65");
    image.push(2);
    image.push(cpu);
    image.push(sp);
    image.extend_from_slice(&load.to_le_bytes());
    image.extend_from_slice(&reset.to_le_bytes());
    image.extend_from_slice(payload);
    image
}

/// Runs slices until the engine stops, then drains the events.
fn run_and_drain(dbg: &mut Debugger) -> Vec<DebugEvent> {
    while dbg.slice() {}
    let mut events = Vec::new();
    while let Some(event) = dbg.poll_event() {
        events.push(event);
    }
    events
}

#[test]
fn test_entry_event_on_configuration_done() {
    let image = sim65_image(0x0200, 0x0200, 0x02, 0, &[0xEA]);
    let mut dbg = Debugger::launch(&image, None, DebuggerOptions::default()).unwrap();

    dbg.configuration_done();
    assert_eq!(
        dbg.poll_event(),
        Some(DebugEvent::Stopped {
            reason: StopReason::Entry
        })
    );
}

#[test]
fn test_exit_trap_terminates_with_code() {
    // LDA #$01 / JMP $FFF9 behind a sim65 header at $7FFE
    let image = sim65_image(0x7FFE, 0x7FFE, 0x02, 0, &[0xA9, 0x01, 0x4C, 0xF9, 0xFF]);
    let mut dbg = Debugger::launch(&image, None, DebuggerOptions::default()).unwrap();

    dbg.resume();
    let events = run_and_drain(&mut dbg);
    assert!(events.contains(&DebugEvent::Terminated { exit_code: 1 }));
    assert!(dbg.is_terminated());

    // Further requests are inert
    dbg.resume();
    assert!(!dbg.slice());
}

#[test]
fn test_breakpoint_stop_and_resume() {
    // NOP; NOP; LDA #$00; JMP $FFF9 as a raw image at $0200
    let payload = [0xEA, 0xEA, 0xA9, 0x00, 0x4C, 0xF9, 0xFF];
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();
    dbg.cpu_mut().add_breakpoint(0x0201, "main.c");

    dbg.resume();
    let events = run_and_drain(&mut dbg);
    assert!(events.contains(&DebugEvent::Stopped {
        reason: StopReason::Breakpoint
    }));
    assert_eq!(dbg.cpu().pc(), 0x0201);
    assert!(!dbg.is_terminated());

    // Resuming steps through the armed breakpoint
    dbg.resume();
    let events = run_and_drain(&mut dbg);
    assert!(events.contains(&DebugEvent::Terminated { exit_code: 0 }));
}

#[test]
fn test_step_over_jsr() {
    // $0200: JSR $0210 / JMP $FFF9; $0210: NOP / RTS
    let mut payload = vec![0x20, 0x10, 0x02, 0x4C, 0xF9, 0xFF];
    payload.resize(0x10, 0xEA);
    payload.extend_from_slice(&[0xEA, 0x60]);
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();

    dbg.step_over();
    let events = run_and_drain(&mut dbg);

    assert!(events.contains(&DebugEvent::Stopped {
        reason: StopReason::Step
    }));
    assert_eq!(dbg.cpu().pc(), 0x0203); // call treated as one line
    assert_eq!(dbg.step_mode(), &StepMode::Run);
}

#[test]
fn test_step_in_advances_one_instruction() {
    let payload = [0xEA, 0xEA, 0xEA];
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();

    dbg.step_in();
    run_and_drain(&mut dbg);
    assert_eq!(dbg.cpu().pc(), 0x0201);

    dbg.step_in();
    run_and_drain(&mut dbg);
    assert_eq!(dbg.cpu().pc(), 0x0202);
}

#[test]
fn test_step_in_follows_call() {
    let mut payload = vec![0x20, 0x10, 0x02, 0xEA];
    payload.resize(0x10, 0xEA);
    payload.push(0x60); // $0210: RTS
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();

    dbg.step_in();
    run_and_drain(&mut dbg);
    assert_eq!(dbg.cpu().pc(), 0x0210); // stopped inside the callee
}

#[test]
fn test_step_out_returns_to_caller() {
    let mut payload = vec![0x20, 0x10, 0x02, 0x4C, 0xF9, 0xFF];
    payload.resize(0x10, 0xEA);
    payload.extend_from_slice(&[0xEA, 0xEA, 0x60]);
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();
    dbg.cpu_mut().add_breakpoint(0x0210, "t");

    dbg.resume();
    run_and_drain(&mut dbg);
    assert_eq!(dbg.cpu().pc(), 0x0210);

    dbg.step_out();
    let events = run_and_drain(&mut dbg);
    assert!(events.contains(&DebugEvent::Stopped {
        reason: StopReason::Step
    }));
    assert_eq!(dbg.cpu().pc(), 0x0203);
}

#[test]
fn test_run_to_cursor() {
    let payload = [0xEA, 0xEA, 0xEA, 0xEA, 0x4C, 0xF9, 0xFF];
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();

    dbg.run_to(0x0203);
    let events = run_and_drain(&mut dbg);
    assert!(events.contains(&DebugEvent::Stopped {
        reason: StopReason::Step
    }));
    assert_eq!(dbg.cpu().pc(), 0x0203);
}

#[test]
fn test_synthetic_stack_reconstruction() {
    let payload = [0xEA];
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();

    // Hand-built stack: SP=$FB with two plausible return addresses whose
    // call sites hold JSR opcodes.
    let cpu = dbg.cpu_mut();
    cpu.set_sp(0xFB);
    cpu.memory_mut().write(0x01FC, 0x05);
    cpu.memory_mut().write(0x01FD, 0x02);
    cpu.memory_mut().write(0x01FE, 0x56);
    cpu.memory_mut().write(0x01FF, 0x3D);
    cpu.memory_mut().write(0x0203, 0x20);
    cpu.memory_mut().write(0x3D54, 0x20);

    let stack = dbg.synthetic_stack();
    let addrs: Vec<u16> = stack.frames.iter().map(|f| f.addr).collect();
    assert_eq!(addrs, vec![0x0200, 0x0203, 0x3D54]);
}

#[test]
fn test_decode_error_stops_with_diagnostic() {
    let payload = [0xEA, 0x02];
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();

    dbg.resume();
    let events = run_and_drain(&mut dbg);

    let diagnostic = events.iter().find_map(|e| match e {
        DebugEvent::Stopped {
            reason: StopReason::Error(d),
        } => Some(d.clone()),
        _ => None,
    });
    let diagnostic = diagnostic.expect("expected an error stop");
    assert!(diagnostic.contains("undefined opcode"));
    assert!(diagnostic.contains("$0201"));
    assert!(!dbg.is_terminated());
    assert_eq!(dbg.cpu().pc(), 0x0201);
}

#[test]
fn test_console_read_suspends_and_resumes() {
    // LDA #1 / LDX #0 / JSR $FFF6 / LDA #0 / JMP $FFF9
    let payload = [
        0xA9, 0x01, 0xA2, 0x00, 0x20, 0xF6, 0xFF, 0xA9, 0x00, 0x4C, 0xF9, 0xFF,
    ];
    let image = sim65_image(0x0200, 0x0200, 0x02, 0, &payload);
    let mut dbg = Debugger::launch(&image, None, DebuggerOptions::default()).unwrap();

    // Software stack with read(fd=0, buf=$B000) parameters pre-pushed
    let mem = dbg.cpu_mut().memory_mut();
    mem.write_word(0x0002, 0xBF00);
    mem.write_word(0xBF00, 0xB000);
    mem.write_word(0xBF02, 0x0000);

    dbg.resume();
    let events = run_and_drain(&mut dbg);
    assert!(events.contains(&DebugEvent::WaitingForInput));
    assert!(!dbg.is_terminated());

    dbg.feed_input(b"Z");
    let events = run_and_drain(&mut dbg);
    assert!(events.contains(&DebugEvent::Terminated { exit_code: 0 }));
    assert_eq!(dbg.cpu().memory().read(0xB000), b'Z');
}

#[test]
fn test_output_events_from_guest_writes() {
    // write(fd=1, buf=$B000, count=3) then exit(0)
    let payload = [
        0xA9, 0x03, 0xA2, 0x00, 0x20, 0xF7, 0xFF, 0xA9, 0x00, 0x4C, 0xF9, 0xFF,
    ];
    let image = sim65_image(0x0200, 0x0200, 0x02, 0, &payload);
    let mut dbg = Debugger::launch(&image, None, DebuggerOptions::default()).unwrap();

    let mem = dbg.cpu_mut().memory_mut();
    mem.write_word(0x0002, 0xBF00);
    mem.write_word(0xBF00, 0xB000);
    mem.write_word(0xBF02, 0x0001);
    mem.load(0xB000, b"hi\n");

    dbg.resume();
    let events = run_and_drain(&mut dbg);
    assert!(events.iter().any(|e| matches!(
        e,
        DebugEvent::Output { text, .. } if text == "hi\n"
    )));
}

const DEBUG_TEXT: &str = "\
file id=1,name=\"main.c\"
seg id=1,name=\"CODE\",start=0x0200,size=32
span id=1,seg=1,start=0,size=3
span id=2,seg=1,start=16,size=2
line file=1,line=5,span=1,type=1
line file=1,line=10,span=2,type=1
scope id=1,name=\"_main\",mod=1,type=scope,span=1
scope id=2,name=\"_sub\",mod=1,type=scope,span=2
mod id=1,name=\"main\",file=1
";

fn launch_with_debug_info() -> Debugger {
    // $0200: JSR $0210 / JMP $FFF9; $0210: NOP / RTS
    let mut payload = vec![0x20, 0x10, 0x02, 0x4C, 0xF9, 0xFF];
    payload.resize(0x10, 0xEA);
    payload.extend_from_slice(&[0xEA, 0x60]);
    let info = DebugInfo::parse(DEBUG_TEXT);
    Debugger::launch(&payload, Some(info), DebuggerOptions::default()).unwrap()
}

#[test]
fn test_set_breakpoints_binds_lines_to_addresses() {
    let mut dbg = launch_with_debug_info();

    let bound = dbg.set_breakpoints("main.c", &[10, 99]);
    assert_eq!(bound, vec![Some(0x0210), None]);

    dbg.resume();
    run_and_drain(&mut dbg);
    assert_eq!(dbg.cpu().pc(), 0x0210);
}

#[test]
fn test_set_breakpoints_replaces_group() {
    let mut dbg = launch_with_debug_info();

    dbg.set_breakpoints("main.c", &[10]);
    // A second call for the same file replaces the previous set
    let bound = dbg.set_breakpoints("main.c", &[5]);
    assert_eq!(bound, vec![Some(0x0200)]);
    assert!(!dbg.cpu().breakpoint_armed(0x0210));
    assert!(dbg.cpu().breakpoint_armed(0x0200));
}

#[test]
fn test_backslash_paths_share_the_group() {
    let mut dbg = launch_with_debug_info();

    dbg.set_breakpoints("src\\main.c", &[10]);
    dbg.set_breakpoints("src/main.c", &[]);
    assert!(!dbg.cpu().breakpoint_armed(0x0210));
}

#[test]
fn test_stack_trace_resolves_names_and_lines() {
    let mut dbg = launch_with_debug_info();
    dbg.set_breakpoints("main.c", &[10]);
    dbg.resume();
    run_and_drain(&mut dbg);

    let frames = dbg.stack_trace(0, 8);
    assert_eq!(frames.len(), 2);

    assert_eq!(frames[0].addr, 0x0210);
    assert_eq!(frames[0].name.as_deref(), Some("sub"));
    assert_eq!(frames[0].line, Some(10));

    assert_eq!(frames[1].addr, 0x0200);
    assert_eq!(frames[1].name.as_deref(), Some("main"));
    assert_eq!(frames[1].line, Some(5));
}

#[test]
fn test_library_scope_names_are_suppressed() {
    let text = "\
file id=1,name=\"conio.s\"
seg id=1,name=\"CODE\",start=0x0200,size=32
span id=1,seg=1,start=0,size=4
scope id=1,name=\"_cputc\",mod=1,type=scope,span=1
mod id=1,name=\"conio\",file=1,lib=1
lib id=1,name=\"c64.lib\"
";
    let payload = [0xEA, 0xEA];
    let info = DebugInfo::parse(text);
    let dbg = Debugger::launch(&payload, Some(info), DebuggerOptions::default()).unwrap();

    let frames = dbg.stack_trace(0, 1);
    assert_eq!(frames[0].addr, 0x0200);
    assert_eq!(frames[0].name, None);
}

#[test]
fn test_evaluate_against_symbols() {
    let text = "\
seg id=1,name=\"CODE\",start=0x0200,size=32
sym id=1,name=\"counter\",size=2,seg=1,type=lab,val=0x0300
";
    let payload = [0xEA];
    let info = DebugInfo::parse(text);
    let mut dbg = Debugger::launch(&payload, Some(info), DebuggerOptions::default()).unwrap();
    dbg.cpu_mut().memory_mut().write_word(0x0300, 0x1234);

    let result = dbg.evaluate("counter").unwrap();
    assert_eq!(result.addr, 0x0300);
    assert_eq!(result.bytes, vec![0x34, 0x12]);
    assert_eq!(result.value(), 0x1234);

    let result = dbg.evaluate("$0300").unwrap();
    assert_eq!(result.bytes, vec![0x34]);

    assert!(dbg.evaluate("missing").is_err());
}

#[test]
fn test_read_memory_by_segment() {
    let payload = [0xA9, 0x55, 0xEA];
    let info = DebugInfo::parse("seg id=1,name=\"CODE\",start=0x0200,size=32\n");
    let dbg = Debugger::launch(&payload, Some(info), DebuggerOptions::default()).unwrap();

    assert_eq!(dbg.read_memory(1, 0, 3), Some(vec![0xA9, 0x55, 0xEA]));
    assert_eq!(dbg.read_memory(1, 1, 1), Some(vec![0x55]));
    assert_eq!(dbg.read_memory(9, 0, 1), None);
}

#[test]
fn test_variables_resolve_against_frame_pointer() {
    let text = "\
seg id=1,name=\"CODE\",start=0x0200,size=32
scope id=1,name=\"_main\",type=scope
csym id=1,name=\"argc\",scope=1,type=1,sc=auto,offs=2
csym id=2,name=\"i\",scope=1,type=1,sc=auto,offs=0
type id=1,val=\"02\"
";
    let payload = [0xEA];
    let info = DebugInfo::parse(text);
    let mut dbg = Debugger::launch(&payload, Some(info), DebuggerOptions::default()).unwrap();

    let mem = dbg.cpu_mut().memory_mut();
    mem.write_word(0xBF00, 0x0007); // i
    mem.write_word(0xBF02, 0x0003); // argc

    let vars = dbg.variables(1, 0xBF00);
    assert_eq!(vars.len(), 2);
    assert_eq!(vars[0].name, "argc");
    assert_eq!(vars[0].addr, Some(0xBF02));
    assert_eq!(vars[0].bytes, vec![0x03, 0x00]);
    assert_eq!(vars[1].name, "i");
    assert_eq!(vars[1].addr, Some(0xBF00));
    assert_eq!(vars[1].bytes, vec![0x07, 0x00]);
}

#[test]
fn test_step_over_with_line_spans_walks_the_whole_line() {
    // Line 5 covers both instructions at $0200 (NOP) and $0201 (NOP);
    // stepping over runs to the first instruction past the line.
    let text = "\
file id=1,name=\"main.c\"
seg id=1,name=\"CODE\",start=0x0200,size=32
span id=1,seg=1,start=0,size=2
line file=1,line=5,span=1,type=1
";
    let payload = [0xEA, 0xEA, 0xEA];
    let info = DebugInfo::parse(text);
    let mut dbg = Debugger::launch(&payload, Some(info), DebuggerOptions::default()).unwrap();

    dbg.step_over();
    run_and_drain(&mut dbg);
    assert_eq!(dbg.cpu().pc(), 0x0202);
}

#[test]
fn test_pause_emits_stop() {
    let payload = [0xEA];
    let mut dbg = Debugger::launch(&payload, None, DebuggerOptions::default()).unwrap();

    dbg.resume();
    dbg.pause();
    assert_eq!(
        dbg.poll_event(),
        Some(DebugEvent::Stopped {
            reason: StopReason::Pause
        })
    );
    assert!(!dbg.slice());
}

#[test]
fn test_disassemble_at_uses_symbols() {
    let text = "\
seg id=1,name=\"CODE\",start=0x0200,size=32
sym id=1,name=\"_start\",seg=1,type=lab,val=0x0200
";
    let payload = [0x4C, 0x00, 0x02]; // JMP $0200
    let info = DebugInfo::parse(text);
    let dbg = Debugger::launch(&payload, Some(info), DebuggerOptions::default()).unwrap();

    assert_eq!(dbg.disassemble_at(0x0200).text, "JMP _start");
}
