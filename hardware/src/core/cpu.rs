//! Cycle Driver.
//!
//! [`Cpu::tick`] advances the machine by exactly one clock cycle. Every
//! stage reads the state as it stood at the start of the cycle; the new
//! latches, the register write and the memory write are all computed
//! before any of them is committed.
//!
//! Order within a cycle:
//! 1. If EX/MEM holds a taken `beq`, redirect `pc` and squash IF/ID, ID/EX
//!    and EX/MEM. IF, ID and EX do not run.
//! 2. Otherwise ID (or a bubble on a load-use stall), IF (frozen while
//!    stalled) and EX run.
//! 3. MEM and WB always run. A poisoned fetch bubble entering MEM raises
//!    its deferred fetch fault instead.

use tracing::{debug, info, trace};

use crate::common::constants::BRANCH_PENALTY;
use crate::common::{AccessType, SimError, Word};
use crate::config::Config;
use crate::core::arch::{Gpr, Memory};
use crate::core::pipeline::hazards::{HazardDetection, IssueHistory};
use crate::core::pipeline::latches::PipelineLatches;
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};
use crate::core::pipeline::traits::PipelineLatch;
use crate::stats::SimStats;

/// The LC-2K pipelined processor.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Address of the next instruction to fetch.
    pub pc: Word,
    /// Cycles completed so far.
    pub cycles: u64,
    /// Register file.
    pub regs: Gpr,
    /// Instruction memory. Read-only after loading.
    pub imem: Memory,
    /// Data memory. Written only by MEM.
    pub dmem: Memory,
    /// Number of words in the loaded image.
    pub program_len: usize,
    /// Inter-stage latches.
    pub latches: PipelineLatches,
    /// Destinations issued into ID/EX over the last three cycles.
    pub history: IssueHistory,
    /// Load-use detector in use.
    pub hazard_detection: HazardDetection,
    /// Performance counters.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a machine with empty memories and bubbles in every latch.
    pub fn new(config: &Config) -> Self {
        Self {
            pc: 0,
            cycles: 0,
            regs: Gpr::new(),
            imem: Memory::new(config.memory.size),
            dmem: Memory::new(config.memory.size),
            program_len: 0,
            latches: PipelineLatches::default(),
            history: IssueHistory::new(),
            hazard_detection: config.pipeline.hazard_detection,
            stats: SimStats::default(),
        }
    }

    /// Creates a machine and loads `image` into both memories.
    ///
    /// # Errors
    ///
    /// [`SimError::ProgramTooLarge`] if the image does not fit.
    pub fn with_program(config: &Config, image: &[Word]) -> Result<Self, SimError> {
        let mut cpu = Self::new(config);
        cpu.load_program(image)?;
        Ok(cpu)
    }

    /// Copies `image` to address 0 of instruction memory and mirrors it
    /// into data memory.
    pub fn load_program(&mut self, image: &[Word]) -> Result<(), SimError> {
        self.imem.load_image(image)?;
        self.dmem.load_image(image)?;
        self.program_len = image.len();
        info!(words = image.len(), "program loaded");
        Ok(())
    }

    /// Returns `true` once `halt` has reached MEM/WB.
    pub fn is_halted(&self) -> bool {
        self.latches.mem_wb.instr.is_halt()
    }

    /// Advances the machine by one cycle. Does nothing once halted.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfBounds`] if a load or a store touches an
    /// address outside memory, or if a bubble from an out-of-range fetch
    /// reaches MEM. The machine is left unchanged.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.is_halted() {
            return Ok(());
        }

        let cur = self.latches;
        if let Some(address) = cur.ex_mem.fetch_fault {
            return Err(self.imem.out_of_bounds(address, AccessType::Fetch));
        }
        let mut next = cur;
        let mut pc = self.pc;
        let mut history = self.history;
        let mut stats = self.stats.clone();

        if cur.ex_mem.branch_taken() {
            pc = cur.ex_mem.branch_target;
            let squashed = [cur.if_id.is_bubble(), cur.id_ex.is_bubble()]
                .iter()
                .filter(|bubble| !**bubble)
                .count() as u64;
            next.if_id.squash();
            next.id_ex.squash();
            next.ex_mem.squash();
            history.clear();

            stats.branches_taken += 1;
            stats.stalls_control += BRANCH_PENALTY;
            stats.flushed_instructions += squashed;
            debug!(cycle = self.cycles, target = pc, squashed, "branch taken, flushing");
        } else {
            let stall = self
                .hazard_detection
                .need_stall(&cur.if_id, &cur.id_ex, &self.history);

            if stall {
                next.id_ex.squash();
                history.advance(None);
                stats.stalls_data += 1;
                debug!(cycle = self.cycles, instr = %cur.if_id.instr, "load-use stall");
            } else {
                for age in self.history.dependencies(cur.if_id.instr) {
                    trace!(instr = %cur.if_id.instr, age, "dependency resolved by forwarding");
                }
                next.id_ex = decode_stage(&cur.if_id, &cur.id_ex, &self.regs);
                history.advance(Some(cur.if_id.instr));

                let (if_id, next_pc) = fetch_stage(self.pc, &cur.if_id, &self.imem);
                next.if_id = if_id;
                pc = next_pc;
            }

            let ex = execute_stage(&cur.id_ex, &cur.ex_mem, &cur.mem_wb, &cur.wb_end);
            next.ex_mem = ex.latch;
            stats.record_forward(ex.operands.a_src);
            stats.record_forward(ex.operands.b_src);
            if cur.id_ex.instr.is_branch() {
                stats.branches_resolved += 1;
            }
        }

        let (mem_wb, store) = mem_stage(&cur.ex_mem, &cur.mem_wb, &self.dmem)?;
        next.mem_wb = mem_wb;
        let (wb_end, reg_write) = wb_stage(&cur.mem_wb);
        next.wb_end = wb_end;
        stats.record_retire(cur.mem_wb.instr);

        if let Some(w) = store {
            self.dmem.write(w.address, w.value)?;
        }
        if let Some(w) = reg_write {
            self.regs.write(w.reg, w.value);
        }
        self.latches = next;
        self.pc = pc;
        self.history = history;
        self.cycles += 1;
        stats.cycles = self.cycles;
        self.stats = stats;

        if self.is_halted() {
            info!(cycles = self.cycles, "machine halted");
        }
        Ok(())
    }

    /// Runs until `halt` reaches MEM/WB.
    ///
    /// `before_cycle` is called with the machine state before every cycle
    /// (used by the trace printer); an error from it stops the run.
    ///
    /// # Returns
    ///
    /// The total number of cycles executed.
    ///
    /// # Errors
    ///
    /// Any error from [`Cpu::tick`] or `before_cycle`, or [`SimError::CycleLimitExceeded`]
    /// once `max_cycles` cycles have run without halting.
    pub fn run<F>(&mut self, max_cycles: Option<u64>, mut before_cycle: F) -> Result<u64, SimError>
    where
        F: FnMut(&Cpu) -> Result<(), SimError>,
    {
        while !self.is_halted() {
            if let Some(limit) = max_cycles {
                if self.cycles >= limit {
                    return Err(SimError::CycleLimitExceeded(limit));
                }
            }
            before_cycle(self)?;
            self.tick()?;
        }
        Ok(self.cycles)
    }
}
