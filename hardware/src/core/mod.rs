//! Processor core.
//!
//! This module contains the architectural state, the five-stage pipeline,
//! the functional units and the cycle driver that ties them together.

/// Register file and word-addressed memories.
pub mod arch;

/// Cycle driver.
pub mod cpu;

/// Pipeline latches, stages, hazard detection and forwarding.
pub mod pipeline;

/// ALU and branch resolution unit.
pub mod units;

pub use cpu::Cpu;
