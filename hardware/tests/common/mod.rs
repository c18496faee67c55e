//! Shared helpers for the integration tests: a tiny assembler and a
//! run-to-halt wrapper.

#![allow(dead_code)]

use lc2k_pipeline::config::Config;
use lc2k_pipeline::core::pipeline::HazardDetection;
use lc2k_pipeline::core::Cpu;

/// Cycle budget used by tests so a broken pipeline cannot hang the suite.
pub const TEST_MAX_CYCLES: u64 = 100_000;

fn encode(op: i32, a: i32, b: i32, field: i32) -> i32 {
    (op << 22) | (a << 19) | (b << 16) | (field & 0xFFFF)
}

pub fn add(a: i32, b: i32, dest: i32) -> i32 {
    encode(0, a, b, dest)
}

pub fn nor(a: i32, b: i32, dest: i32) -> i32 {
    encode(1, a, b, dest)
}

pub fn lw(a: i32, b: i32, offset: i32) -> i32 {
    encode(2, a, b, offset)
}

pub fn sw(a: i32, b: i32, offset: i32) -> i32 {
    encode(3, a, b, offset)
}

pub fn beq(a: i32, b: i32, offset: i32) -> i32 {
    encode(4, a, b, offset)
}

pub fn jalr(a: i32, b: i32) -> i32 {
    encode(5, a, b, 0)
}

pub fn halt() -> i32 {
    encode(6, 0, 0, 0)
}

pub fn noop() -> i32 {
    encode(7, 0, 0, 0)
}

/// Configuration used by tests: no tracing, bounded run.
pub fn test_config(detector: HazardDetection) -> Config {
    let mut config = Config::default();
    config.general.trace_state = false;
    config.general.max_cycles = TEST_MAX_CYCLES;
    config.pipeline.hazard_detection = detector;
    config
}

/// Loads `image` into a fresh machine without running it.
pub fn load(image: &[i32], detector: HazardDetection) -> Cpu {
    Cpu::with_program(&test_config(detector), image).expect("program fits in memory")
}

/// Runs `image` to halt with the given hazard detector.
pub fn run_with(image: &[i32], detector: HazardDetection) -> Cpu {
    let mut cpu = load(image, detector);
    cpu.run(Some(TEST_MAX_CYCLES), |_| Ok(()))
        .expect("program halts without error");
    cpu
}

/// Runs `image` to halt with the default hazard detector.
pub fn run(image: &[i32]) -> Cpu {
    run_with(image, HazardDetection::LatchCompare)
}
