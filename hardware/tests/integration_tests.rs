//! Integration tests for the full pipeline.
//!
//! Each test runs a small hand-assembled program to halt and checks the
//! architectural result together with the cycle count the pipeline model
//! prescribes: `instructions before halt + 4`, plus one cycle per load-use
//! stall and three per taken branch.

mod common;

use common::*;
use lc2k_pipeline::common::{AccessType, SimError};
use lc2k_pipeline::config::Config;
use lc2k_pipeline::core::pipeline::{HazardDetection, PipelineLatch};
use lc2k_pipeline::core::Cpu;
use lc2k_pipeline::isa::Instruction;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Tests straight-line latency: halt at address `h` takes `h + 4` cycles.
#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(10)]
fn test_straight_line_latency(#[case] h: usize) {
    let mut image = vec![noop(); h];
    image.push(halt());
    let cpu = run(&image);
    assert_eq!(cpu.cycles, h as u64 + 4);
    assert!(cpu.is_halted());
    assert_eq!(cpu.stats.stalls_data, 0);
}

/// Tests three chained ALU instructions resolved purely by forwarding.
#[test]
fn test_forwarding_chain_no_stalls() {
    let image = [
        lw(0, 1, 8),
        lw(0, 2, 9),
        noop(),
        add(1, 2, 3),
        add(3, 3, 4),
        add(4, 3, 5),
        halt(),
        0,
        3,
        4,
    ];
    let cpu = run(&image);

    assert_eq!(cpu.regs.as_slice(), &[0, 3, 4, 7, 14, 21, 0, 0]);
    assert_eq!(cpu.cycles, 10);
    assert_eq!(cpu.stats.stalls_data, 0);
    assert_eq!(cpu.stats.forwards_ex_mem, 3);
    assert_eq!(cpu.stats.forwards_mem_wb, 2);
    assert_eq!(cpu.stats.forwards_wb_end, 1);
    assert_eq!(cpu.stats.instructions_retired, 5);
}

/// Tests that a load followed by a dependent add costs exactly one bubble.
#[test]
fn test_load_use_single_stall() {
    let image = [lw(0, 1, 4), add(1, 1, 2), halt(), noop(), 9];
    let mut cpu = load(&image, HazardDetection::LatchCompare);

    cpu.tick().unwrap();
    cpu.tick().unwrap();
    assert!(cpu.latches.id_ex.instr.is_load());
    assert_eq!(cpu.latches.if_id.instr, Instruction(add(1, 1, 2)));

    // Stall cycle: bubble into ID/EX, IF/ID and pc held.
    cpu.tick().unwrap();
    assert!(cpu.latches.id_ex.is_bubble());
    assert_eq!(cpu.latches.if_id.instr, Instruction(add(1, 1, 2)));
    assert_eq!(cpu.pc, 2);

    cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap();
    assert_eq!(cpu.regs.read(2), 18);
    assert_eq!(cpu.cycles, 2 + 4 + 1);
    assert_eq!(cpu.stats.stalls_data, 1);
    assert_eq!(cpu.stats.forwards_mem_wb, 2);
}

/// Tests a consumer that overwrites the register it reads from a load.
#[test]
fn test_load_use_consumer_writes_same_register() {
    let image = [lw(0, 1, 4), add(1, 2, 1), halt(), noop(), 3];
    let cpu = run(&image);
    assert_eq!(cpu.regs.read(1), 3);
    assert_eq!(cpu.cycles, 7);
}

/// Tests that a load whose destination is only a later load's `regB` does not stall.
#[test]
fn test_load_then_load_into_same_register() {
    let image = [lw(0, 1, 4), lw(0, 1, 5), halt(), noop(), 10, 20];
    let cpu = run(&image);
    assert_eq!(cpu.regs.read(1), 20);
    assert_eq!(cpu.stats.stalls_data, 0);
    assert_eq!(cpu.cycles, 6);
}

/// Tests that a taken branch squashes exactly the wrong-path instructions.
#[test]
fn test_branch_taken_squash() {
    let image = [
        beq(0, 0, 2),
        lw(0, 1, 6),
        nor(0, 0, 3),
        lw(0, 5, 6),
        halt(),
        noop(),
        42,
    ];
    let mut cpu = load(&image, HazardDetection::LatchCompare);

    for _ in 0..3 {
        cpu.tick().unwrap();
    }
    assert!(cpu.latches.ex_mem.branch_taken());
    assert_eq!(cpu.latches.ex_mem.branch_target, 3);

    // Resolution cycle.
    cpu.tick().unwrap();
    assert_eq!(cpu.pc, 3);
    assert!(cpu.latches.if_id.is_bubble());
    assert!(cpu.latches.id_ex.is_bubble());
    assert!(cpu.latches.ex_mem.is_bubble());
    assert!(!cpu.latches.ex_mem.eq);
    assert!(cpu.latches.mem_wb.instr.is_branch());

    cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap();
    assert_eq!(cpu.regs.read(1), 0, "wrong-path lw retired");
    assert_eq!(cpu.regs.read(3), 0, "wrong-path nor retired");
    assert_eq!(cpu.regs.read(5), 42);
    assert_eq!(cpu.cycles, 2 + 4 + 3);
    assert_eq!(cpu.stats.branches_taken, 1);
    assert_eq!(cpu.stats.branches_resolved, 1);
    assert_eq!(cpu.stats.flushed_instructions, 2);
}

/// Tests a not-taken branch: sequential code runs, no flush.
#[test]
fn test_branch_not_taken() {
    let image = [lw(0, 1, 5), beq(0, 1, 1), add(1, 1, 2), halt(), noop(), 7];
    let cpu = run(&image);
    assert_eq!(cpu.regs.read(2), 14);
    assert_eq!(cpu.cycles, 3 + 4 + 1);
    assert_eq!(cpu.stats.branches_resolved, 1);
    assert_eq!(cpu.stats.branches_taken, 0);
    assert_eq!(cpu.stats.flushed_instructions, 0);
}

/// Tests that nothing after halt writes registers or memory.
#[test]
fn test_halt_drains() {
    let image = [halt(), sw(0, 1, 3), lw(0, 1, 3), 5];
    let mut cpu = load(&image, HazardDetection::LatchCompare);
    cpu.regs.write(1, 99);
    cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap();

    assert_eq!(cpu.cycles, 4);
    assert_eq!(cpu.dmem.read(3, AccessType::Read).unwrap(), 5);
    assert_eq!(cpu.regs.read(1), 99);
    assert_eq!(cpu.stats.instructions_retired, 0);

    // Further ticks are ignored once halted.
    cpu.tick().unwrap();
    assert_eq!(cpu.cycles, 4);
}

/// Tests a store followed by a load from the same address.
#[test]
fn test_store_load_round_trip() {
    let image = [lw(0, 1, 6), sw(0, 1, 7), lw(0, 2, 7), halt(), noop(), noop(), 77, 0];
    let cpu = run(&image);
    assert_eq!(cpu.dmem.read(7, AccessType::Read).unwrap(), 77);
    assert_eq!(cpu.regs.read(2), 77);
    assert_eq!(cpu.cycles, 3 + 4 + 1);
    assert_eq!(
        cpu.imem.read(7, AccessType::Fetch).unwrap(),
        0,
        "instruction memory is unaffected by stores"
    );
}

/// Tests that `jalr` and data words pass through as no-ops.
#[test]
fn test_jalr_and_data_are_noops() {
    let image = [jalr(1, 2), -1, halt()];
    let cpu = run(&image);
    assert_eq!(cpu.regs.as_slice(), &[0; 8]);
    assert_eq!(cpu.cycles, 6);
    assert_eq!(cpu.stats.instructions_retired, 1);
}

/// Countdown loop summing `n-1 + ... + 0`.
fn countdown_program(n: i32) -> Vec<i32> {
    vec![
        lw(0, 1, 7),
        lw(0, 2, 8),
        beq(1, 0, 3),
        add(1, 2, 1),
        add(3, 1, 3),
        beq(0, 0, -4),
        halt(),
        n,
        -1,
    ]
}

/// Tests a loop with backward branches, forwarding and squashes.
#[test]
fn test_countdown_loop() {
    let cpu = run(&countdown_program(10));
    assert_eq!(cpu.regs.read(1), 0);
    assert_eq!(cpu.regs.read(3), 45);
    assert_eq!(cpu.stats.branches_taken, 11);
}

/// Tests that both hazard detectors produce identical runs.
#[rstest]
#[case::forwarding(vec![lw(0, 1, 8), lw(0, 2, 9), noop(), add(1, 2, 3), add(3, 3, 4), add(4, 3, 5), halt(), 0, 3, 4])]
#[case::load_use(vec![lw(0, 1, 4), add(1, 1, 2), halt(), noop(), 9])]
#[case::store(vec![lw(0, 1, 6), sw(0, 1, 7), lw(0, 2, 7), halt(), noop(), noop(), 77, 0])]
#[case::branch(vec![beq(0, 0, 2), lw(0, 1, 6), nor(0, 0, 3), lw(0, 5, 6), halt(), noop(), 42])]
#[case::loop_(countdown_program(25))]
fn test_hazard_strategies_identical(#[case] image: Vec<i32>) {
    let a = run_with(&image, HazardDetection::LatchCompare);
    let b = run_with(&image, HazardDetection::IssueHistory);

    assert_eq!(a.cycles, b.cycles);
    assert_eq!(a.regs, b.regs);
    assert_eq!(a.dmem, b.dmem);
    assert_eq!(a.latches, b.latches);
    assert_eq!(a.pc, b.pc);
    assert_eq!(a.stats.stalls_data, b.stats.stalls_data);
}

/// Tests that an out-of-bounds load fails without corrupting state.
#[test]
fn test_load_out_of_bounds() {
    let mut config = test_config(HazardDetection::LatchCompare);
    config.memory.size = 8;
    let mut cpu = Cpu::with_program(&config, &[lw(0, 1, 100), halt()]).unwrap();

    let err = cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap_err();
    assert!(matches!(
        err,
        SimError::AddressOutOfBounds {
            access: AccessType::Read,
            address: 100,
            size: 8
        }
    ));
    assert_eq!(cpu.cycles, 3, "the faulting cycle was not committed");
    assert_eq!(cpu.regs.read(1), 0);
}

/// Tests that an out-of-bounds store fails.
#[test]
fn test_store_out_of_bounds() {
    let mut config = test_config(HazardDetection::LatchCompare);
    config.memory.size = 8;
    let mut cpu = Cpu::with_program(&config, &[sw(0, 1, -1), halt()]).unwrap();

    let err = cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap_err();
    assert!(matches!(
        err,
        SimError::AddressOutOfBounds {
            access: AccessType::Write,
            address: -1,
            ..
        }
    ));
}

/// Tests that running off the end of instruction memory is a fetch error.
#[test]
fn test_fetch_out_of_bounds() {
    let mut config = test_config(HazardDetection::LatchCompare);
    config.memory.size = 4;
    let mut cpu = Cpu::with_program(&config, &[noop(); 4]).unwrap();

    let err = cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap_err();
    assert!(matches!(
        err,
        SimError::AddressOutOfBounds {
            access: AccessType::Fetch,
            address: 4,
            ..
        }
    ));
}

/// Tests that a branch to a negative address faults on the next fetch.
#[test]
fn test_negative_branch_target() {
    let mut cpu = load(&[beq(0, 0, -5), halt()], HazardDetection::LatchCompare);
    let err = cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap_err();
    assert!(matches!(
        err,
        SimError::AddressOutOfBounds {
            access: AccessType::Fetch,
            address: -4,
            ..
        }
    ));
}

/// Tests that `halt` in the last word of memory still halts normally.
///
/// IF runs past the end while `halt` drains. Those fetches must not fault
/// because nothing they latch ever issues.
#[rstest]
#[case(HazardDetection::LatchCompare)]
#[case(HazardDetection::IssueHistory)]
fn test_halt_in_last_memory_word(#[case] detector: HazardDetection) {
    let mut config = test_config(detector);
    config.memory.size = 2;
    let mut cpu = Cpu::with_program(&config, &[noop(), halt()]).unwrap();

    let cycles = cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap();
    assert_eq!(cycles, 5);
    assert!(cpu.is_halted());
}

/// Tests that wrong-path fetches past the end of memory are squashed
/// by the taken branch instead of faulting.
#[test]
fn test_wrong_path_fetch_past_end() {
    let mut config = test_config(HazardDetection::LatchCompare);
    config.memory.size = 3;
    // 0: jump to 2; 1: halt; 2: jump back to 1, falling through to 3.
    let image = [beq(0, 0, 1), halt(), beq(0, 0, -2)];
    let mut cpu = Cpu::with_program(&config, &image).unwrap();

    let cycles = cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(())).unwrap();
    // `halt` is fetched in cycle 8, after two taken branches.
    assert_eq!(cycles, 12);
    assert_eq!(cpu.stats.branches_taken, 2);
    assert!(cpu.is_halted());
}

/// Tests forwarding right after a taken branch with offset 0.
///
/// The flush must discard every in-flight producer: `add` re-fetched at
/// the branch target reads `r6` from the register file, long after the
/// `lw` has written it.
#[rstest]
#[case(HazardDetection::LatchCompare)]
#[case(HazardDetection::IssueHistory)]
fn test_dependent_after_taken_branch(#[case] detector: HazardDetection) {
    let image = [
        lw(0, 6, 9),
        beq(0, 2, 0),
        add(6, 5, 5),
        halt(),
        noop(),
        noop(),
        noop(),
        noop(),
        noop(),
        42,
    ];
    let cpu = run_with(&image, detector);

    assert_eq!(cpu.regs.read(5), 42);
    assert_eq!(cpu.regs.read(5), cpu.dmem.read(9, AccessType::Read).unwrap());
    // Three instructions before `halt` plus one taken branch.
    assert_eq!(cpu.cycles, 10);
    assert_eq!(cpu.stats.branches_taken, 1);
}

/// Tests the cycle limit on a program that never halts.
#[test]
fn test_cycle_limit() {
    let mut cpu = load(&[beq(0, 0, -1)], HazardDetection::LatchCompare);
    let err = cpu.run(Some(50), |_| Ok(())).unwrap_err();
    assert!(matches!(err, SimError::CycleLimitExceeded(50)));
    assert_eq!(cpu.cycles, 50);
}

/// Tests that an image larger than memory is rejected at load time.
#[test]
fn test_program_too_large() {
    let mut config = Config::default();
    config.memory.size = 2;
    let err = Cpu::with_program(&config, &[noop(), noop(), halt()]).unwrap_err();
    assert!(matches!(
        err,
        SimError::ProgramTooLarge {
            words: 3,
            capacity: 2
        }
    ));
}

/// Tests the statistics report rendering after a run.
#[test]
fn test_stats_report() {
    let cpu = run(&countdown_program(3));
    let report = cpu.stats.to_string();
    assert!(report.contains("LC-2K PIPELINE SIMULATION STATISTICS"));
    assert!(report.contains(&format!("sim_cycles               {}\n", cpu.cycles)));
    assert!(report.contains("br.taken"));
    assert!(cpu.stats.ipc() > 0.0 && cpu.stats.ipc() < 1.0);
}
