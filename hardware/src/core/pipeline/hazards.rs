//! Data Hazard Detection and Forwarding.
//!
//! This module implements the two halves of RAW hazard handling:
//! 1. **Load-use stalls:** an instruction in ID that reads the destination
//!    of a `lw` in ID/EX is held for one cycle. Two interchangeable
//!    detectors are provided, selected by [`HazardDetection`].
//! 2. **Forwarding:** EX picks each operand from the youngest in-flight
//!    producer (EX/MEM, then MEM/WB, then WB/END) before falling back to
//!    the value read in ID.

use serde::{Deserialize, Serialize};

use crate::common::Word;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb, WbEnd};
use crate::isa::{Instruction, Opcode};

/// Depth of the issue-history shift register.
pub const ISSUE_HISTORY_DEPTH: usize = 3;

/// Load-use detector implementation.
///
/// Both strategies stall on exactly the same cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HazardDetection {
    /// Compare the ID/EX instruction against the IF/ID instruction.
    #[default]
    LatchCompare,
    /// Consult a shift register of recently issued destinations.
    IssueHistory,
}

impl HazardDetection {
    /// Decides whether the instruction in IF/ID must stall this cycle.
    pub fn need_stall(self, if_id: &IfId, id_ex: &IdEx, history: &IssueHistory) -> bool {
        match self {
            HazardDetection::LatchCompare => need_stall_load_use(id_ex, if_id),
            HazardDetection::IssueHistory => history.need_stall(if_id.instr),
        }
    }
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch, holding the instruction about to execute
/// * `if_id` - The IF/ID latch, holding the instruction being decoded
///
/// # Returns
///
/// `true` if ID/EX holds a `lw` whose destination the IF/ID instruction reads.
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> bool {
    if !id_ex.instr.is_load() {
        return false;
    }
    if_id.instr.reads(id_ex.instr.reg_b())
}

/// Destination recorded by the issue history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IssuedDest {
    /// Register the issued instruction writes.
    pub reg: usize,
    /// Whether the value comes from a load (and is not ready until MEM/WB).
    pub is_load: bool,
}

/// Destinations of the last three instructions issued into ID/EX.
///
/// Slot 0 is the youngest (now in ID/EX), slot 2 the oldest (now in
/// MEM/WB). Bubbles and instructions without a destination leave `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IssueHistory {
    slots: [Option<IssuedDest>; ISSUE_HISTORY_DEPTH],
}

impl IssueHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts the history by one cycle.
    ///
    /// `issued` is the instruction entering ID/EX, or `None` for a bubble.
    pub fn advance(&mut self, issued: Option<Instruction>) {
        self.slots.rotate_right(1);
        self.slots[0] = issued.and_then(|inst| {
            inst.dest_reg().map(|reg| IssuedDest {
                reg,
                is_load: inst.is_load(),
            })
        });
    }

    /// Forgets every entry. Used when a taken branch squashes the pipeline.
    pub fn clear(&mut self) {
        self.slots = [None; ISSUE_HISTORY_DEPTH];
    }

    /// Entries from youngest to oldest.
    pub fn slots(&self) -> &[Option<IssuedDest>; ISSUE_HISTORY_DEPTH] {
        &self.slots
    }

    /// A stall is needed only when the age-1 entry is a load that
    /// `consumer` reads. Older producers are covered by forwarding.
    pub fn need_stall(&self, consumer: Instruction) -> bool {
        matches!(self.slots[0], Some(dest) if dest.is_load && consumer.reads(dest.reg))
    }

    /// Ages (1-based) of the in-flight producers `consumer` depends on.
    pub fn dependencies(&self, consumer: Instruction) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(age, slot)| match slot {
                Some(dest) if consumer.reads(dest.reg) => Some(age + 1),
                _ => None,
            })
    }
}

/// Where EX took an operand from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ForwardSource {
    /// The value read from the register file in ID.
    #[default]
    NoForward,
    /// The ALU result in EX/MEM.
    ExMem,
    /// The write data in MEM/WB.
    MemWb,
    /// The write data in WB/END.
    WbEnd,
}

/// Operands resolved for the instruction in EX.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardedOperands {
    /// Value of `regA`.
    pub a: Word,
    /// Value of `regB`.
    pub b: Word,
    /// Source of `a`.
    pub a_src: ForwardSource,
    /// Source of `b`.
    pub b_src: ForwardSource,
}

/// Register an in-flight instruction will write, if it may forward it.
///
/// A `lw` in EX/MEM has not read memory yet, so it is only a candidate
/// from MEM/WB onwards.
fn forwardable_dest(inst: Instruction, load_ready: bool) -> Option<usize> {
    match inst.opcode() {
        Opcode::Add | Opcode::Nor => inst.dest_reg(),
        Opcode::Lw if load_ready => inst.dest_reg(),
        _ => None,
    }
}

/// Resolves one operand by priority search, youngest producer first.
pub fn forward_operand(
    reg: usize,
    fallback: Word,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
    wb_end: &WbEnd,
) -> (Word, ForwardSource) {
    if forwardable_dest(ex_mem.instr, false) == Some(reg) {
        (ex_mem.alu_result, ForwardSource::ExMem)
    } else if forwardable_dest(mem_wb.instr, true) == Some(reg) {
        (mem_wb.write_data, ForwardSource::MemWb)
    } else if forwardable_dest(wb_end.instr, true) == Some(reg) {
        (wb_end.write_data, ForwardSource::WbEnd)
    } else {
        (fallback, ForwardSource::NoForward)
    }
}

/// Forwards register values from later pipeline stages to resolve data hazards.
///
/// Only operands the instruction actually reads are searched; the others
/// keep their ID-time values and report [`ForwardSource::NoForward`].
///
/// # Arguments
///
/// * `id_entry` - The ID/EX latch entering EX
/// * `ex_mem` - Producer one instruction older
/// * `mem_wb` - Producer two instructions older
/// * `wb_end` - Producer three instructions older
pub fn forward_rs(id_entry: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb, wb_end: &WbEnd) -> ForwardedOperands {
    let [reads_a, reads_b] = id_entry.instr.source_regs();
    let (a, a_src) = match reads_a {
        Some(reg) => forward_operand(reg, id_entry.read_reg_a, ex_mem, mem_wb, wb_end),
        None => (id_entry.read_reg_a, ForwardSource::NoForward),
    };
    let (b, b_src) = match reads_b {
        Some(reg) => forward_operand(reg, id_entry.read_reg_b, ex_mem, mem_wb, wb_end),
        None => (id_entry.read_reg_b, ForwardSource::NoForward),
    };
    ForwardedOperands { a, b, a_src, b_src }
}
