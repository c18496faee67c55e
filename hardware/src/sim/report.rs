//! Final-state report.
//!
//! The `--json` output mode serializes a [`FinalState`] instead of printing
//! the text dump.

use serde::Serialize;

use crate::common::Word;
use crate::core::arch::Gpr;
use crate::core::pipeline::PipelineLatches;
use crate::core::Cpu;
use crate::stats::SimStats;

/// Snapshot of the machine after it halted.
#[derive(Debug, Serialize)]
pub struct FinalState<'a> {
    /// Whether `halt` reached MEM/WB.
    pub halted: bool,
    /// Cycles executed.
    pub cycles: u64,
    /// Program counter after the last cycle.
    pub pc: Word,
    /// Register file contents.
    pub registers: &'a Gpr,
    /// Data memory over the loaded range.
    pub data_memory: &'a [Word],
    /// All five pipeline latches.
    pub latches: &'a PipelineLatches,
    /// Performance counters.
    pub stats: &'a SimStats,
}

impl<'a> FinalState<'a> {
    /// Captures the state of `cpu`.
    pub fn capture(cpu: &'a Cpu) -> Self {
        Self {
            halted: cpu.is_halted(),
            cycles: cpu.cycles,
            pc: cpu.pc,
            registers: &cpu.regs,
            data_memory: cpu.dmem.prefix(cpu.program_len),
            latches: &cpu.latches,
            stats: &cpu.stats,
        }
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
