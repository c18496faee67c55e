//! Pipeline control signals.
//!
//! The control unit of the LC-2K datapath is small enough to be a pure
//! function of the opcode. Stages ask for the signals of the instruction
//! they hold rather than matching on opcodes themselves.

use crate::common::Word;
use crate::isa::{Instruction, Opcode};

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition (`add`, and address generation for `lw`/`sw`).
    #[default]
    Add,

    /// Bitwise NOR.
    Nor,
}

/// Control signals generated from an instruction's opcode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// ALU operation, if the instruction produces an ALU result.
    pub alu: Option<AluOp>,
    /// Second ALU operand is the sign-extended offset instead of `regB`.
    pub alu_src_offset: bool,
    /// Result is written to a register in WB.
    pub reg_write: bool,
    /// Reads data memory in MEM.
    pub mem_read: bool,
    /// Writes data memory in MEM.
    pub mem_write: bool,
    /// Conditional branch resolved in EX.
    pub branch: bool,
    /// Stops the machine when it reaches MEM/WB.
    pub halt: bool,
}

impl ControlSignals {
    /// Generates the signals for `inst`. Data words get all-false signals.
    pub fn for_instruction(inst: Instruction) -> Self {
        match inst.opcode() {
            Opcode::Add => Self {
                alu: Some(AluOp::Add),
                reg_write: true,
                ..Self::default()
            },
            Opcode::Nor => Self {
                alu: Some(AluOp::Nor),
                reg_write: true,
                ..Self::default()
            },
            Opcode::Lw => Self {
                alu: Some(AluOp::Add),
                alu_src_offset: true,
                reg_write: true,
                mem_read: true,
                ..Self::default()
            },
            Opcode::Sw => Self {
                alu: Some(AluOp::Add),
                alu_src_offset: true,
                mem_write: true,
                ..Self::default()
            },
            Opcode::Beq => Self {
                branch: true,
                ..Self::default()
            },
            Opcode::Halt => Self {
                halt: true,
                ..Self::default()
            },
            Opcode::Jalr | Opcode::Noop => Self::default(),
        }
    }
}

/// A register write produced by WB and applied when the cycle commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register index.
    pub reg: usize,
    /// Value written.
    pub value: Word,
}

/// A data-memory write produced by MEM and applied when the cycle commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemWrite {
    /// Word address, already bounds-checked.
    pub address: Word,
    /// Value stored.
    pub value: Word,
}
