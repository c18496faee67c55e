//! Pipeline performance counters.
//!
//! Tracks instruction counts, hazard and branch behaviour, forwarding
//! activity and host execution time.

use std::fmt;
use std::time::Instant;

use serde::Serialize;

use crate::core::pipeline::ForwardSource;
use crate::isa::{Instruction, Opcode};

/// Counters updated by the cycle driver. `cycles` mirrors [`Cpu::cycles`].
///
/// [`Cpu::cycles`]: crate::core::Cpu::cycles
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,

    pub inst_alu: u64,
    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_branch: u64,
    pub inst_other: u64,

    pub branches_resolved: u64,
    pub branches_taken: u64,
    pub flushed_instructions: u64,

    pub stalls_data: u64,
    pub stalls_control: u64,

    pub forwards_ex_mem: u64,
    pub forwards_mem_wb: u64,
    pub forwards_wb_end: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_other: 0,
            branches_resolved: 0,
            branches_taken: 0,
            flushed_instructions: 0,
            stalls_data: 0,
            stalls_control: 0,
            forwards_ex_mem: 0,
            forwards_mem_wb: 0,
            forwards_wb_end: 0,
        }
    }
}

impl SimStats {
    /// Counts an instruction leaving WB.
    ///
    /// Bubbles, data words and `halt` never retire.
    pub fn record_retire(&mut self, inst: Instruction) {
        let Some(op) = inst.encoded_opcode() else {
            return;
        };
        match op {
            Opcode::Add | Opcode::Nor => self.inst_alu += 1,
            Opcode::Lw => self.inst_load += 1,
            Opcode::Sw => self.inst_store += 1,
            Opcode::Beq => self.inst_branch += 1,
            Opcode::Jalr => self.inst_other += 1,
            Opcode::Halt | Opcode::Noop => return,
        }
        self.instructions_retired += 1;
    }

    /// Counts one forwarded operand.
    pub fn record_forward(&mut self, src: ForwardSource) {
        match src {
            ForwardSource::NoForward => {}
            ForwardSource::ExMem => self.forwards_ex_mem += 1,
            ForwardSource::MemWb => self.forwards_mem_wb += 1,
            ForwardSource::WbEnd => self.forwards_wb_end += 1,
        }
    }

    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        ratio(self.instructions_retired, self.cycles)
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

/// `num / den`, or zero when nothing was counted.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn percent(num: u64, den: u64) -> f64 {
    ratio(num, den) * 100.0
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "----------------------------------------------------------";
        const BANNER: &str = "==========================================================";

        let secs = self.start_time.elapsed().as_secs_f64();
        let khz = if secs > 0.0 {
            self.cycles as f64 / secs / 1000.0
        } else {
            0.0
        };
        let retired = self.instructions_retired;

        writeln!(f, "\n{BANNER}")?;
        writeln!(f, "LC-2K PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "{BANNER}")?;
        writeln!(f, "host_seconds             {secs:.4} s")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_freq                 {khz:.2} kHz")?;
        writeln!(f, "sim_insts                {retired}")?;
        writeln!(f, "sim_ipc                  {:.4}", self.ipc())?;
        writeln!(f, "sim_cpi                  {:.4}", ratio(self.cycles, retired))?;
        writeln!(f, "{RULE}")?;

        writeln!(f, "HAZARDS")?;
        for (name, count) in [
            ("stalls.data", self.stalls_data),
            ("stalls.control", self.stalls_control),
        ] {
            writeln!(f, "  {name:<22} {count} ({:.2}%)", percent(count, self.cycles))?;
        }
        for (name, count) in [
            ("fwd.ex_mem", self.forwards_ex_mem),
            ("fwd.mem_wb", self.forwards_mem_wb),
            ("fwd.wb_end", self.forwards_wb_end),
        ] {
            writeln!(f, "  {name:<22} {count}")?;
        }
        writeln!(f, "{RULE}")?;

        writeln!(f, "INSTRUCTION MIX")?;
        for (name, count) in [
            ("op.alu", self.inst_alu),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.other", self.inst_other),
        ] {
            writeln!(f, "  {name:<22} {count} ({:.2}%)", percent(count, retired))?;
        }
        writeln!(f, "{RULE}")?;

        writeln!(f, "BRANCHES")?;
        writeln!(f, "  br.resolved            {}", self.branches_resolved)?;
        writeln!(
            f,
            "  br.taken               {} ({:.2}%)",
            self.branches_taken,
            percent(self.branches_taken, self.branches_resolved)
        )?;
        writeln!(f, "  br.flushed_insts       {}", self.flushed_instructions)?;
        writeln!(f, "{BANNER}")
    }
}
