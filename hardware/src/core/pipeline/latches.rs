//! Pipeline latch structures for inter-stage communication.
//!
//! Five latches sit between the stages: IF/ID, ID/EX, EX/MEM, MEM/WB and
//! WB/END. The last one only exists to feed the oldest forwarding path.
//! All latches start as bubbles with zeroed fields.

use serde::Serialize;

use crate::common::Word;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Instruction;

/// IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IfId {
    /// Fetched instruction word.
    pub instr: Instruction,
    /// Address of the next sequential instruction.
    pub pc_plus1: Word,
    /// Out-of-range fetch address carried by a poisoned bubble.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_fault: Option<Word>,
}

/// ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IdEx {
    /// Decoded instruction word.
    pub instr: Instruction,
    /// Address of the next sequential instruction.
    pub pc_plus1: Word,
    /// Value of `reg[regA]` read from the register file in ID.
    pub read_reg_a: Word,
    /// Value of `reg[regB]` read from the register file in ID.
    pub read_reg_b: Word,
    /// Sign-extended 16-bit offset.
    pub offset: Word,
    /// Out-of-range fetch address carried by a poisoned bubble.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_fault: Option<Word>,
}

/// EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExMem {
    /// Executed instruction word.
    pub instr: Instruction,
    /// `pcPlus1 + offset`, computed for every instruction.
    pub branch_target: Word,
    /// Set when a `beq` found its operands equal.
    pub eq: bool,
    /// ALU output, or effective address for `lw`/`sw`.
    pub alu_result: Word,
    /// Forwarded `regB` value carried by `sw` as store data.
    pub read_reg_b: Word,
    /// Out-of-range fetch address carried by a poisoned bubble.
    ///
    /// The fault is raised when the bubble reaches MEM. By then every older
    /// instruction has left MEM, so a `halt` ahead of it has already
    /// stopped the machine and a taken branch has already squashed it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_fault: Option<Word>,
}

/// MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemWb {
    /// Instruction word.
    pub instr: Instruction,
    /// ALU result or loaded value destined for the register file.
    pub write_data: Word,
}

/// WB/END pipeline latch, holding the instruction that just retired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WbEnd {
    /// Retired instruction word.
    pub instr: Instruction,
    /// Value that was written back.
    pub write_data: Word,
}

impl PipelineLatch for IfId {
    fn instr(&self) -> Instruction {
        self.instr
    }

    fn squash(&mut self) {
        self.instr = Instruction::NOOP;
        self.fetch_fault = None;
    }
}

impl PipelineLatch for IdEx {
    fn instr(&self) -> Instruction {
        self.instr
    }

    fn squash(&mut self) {
        self.instr = Instruction::NOOP;
        self.fetch_fault = None;
    }
}

impl PipelineLatch for ExMem {
    fn instr(&self) -> Instruction {
        self.instr
    }

    fn squash(&mut self) {
        self.instr = Instruction::NOOP;
        self.eq = false;
        self.fetch_fault = None;
    }
}

impl PipelineLatch for MemWb {
    fn instr(&self) -> Instruction {
        self.instr
    }

    fn squash(&mut self) {
        self.instr = Instruction::NOOP;
    }
}

impl PipelineLatch for WbEnd {
    fn instr(&self) -> Instruction {
        self.instr
    }

    fn squash(&mut self) {
        self.instr = Instruction::NOOP;
    }
}

impl ExMem {
    /// Returns `true` when this latch holds a taken branch.
    ///
    /// Checked at the start of every cycle to decide whether to flush.
    pub fn branch_taken(&self) -> bool {
        self.eq && self.instr.is_branch()
    }
}

/// The full set of pipeline latches, advanced together once per cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineLatches {
    /// Fetch to Decode.
    pub if_id: IfId,
    /// Decode to Execute.
    pub id_ex: IdEx,
    /// Execute to Memory.
    pub ex_mem: ExMem,
    /// Memory to Writeback.
    pub mem_wb: MemWb,
    /// Writeback to end of pipeline.
    pub wb_end: WbEnd,
}
