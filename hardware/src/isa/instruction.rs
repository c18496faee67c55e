//! Instruction wrapper.
//!
//! [`Instruction`] is a thin newtype over the raw word that answers the
//! questions the hazard unit and the forwarding network ask: which
//! registers does this instruction read, which one does it write, and is
//! it a load.

use serde::Serialize;

use crate::common::{Word, NOOP_INSTRUCTION};
use crate::isa::decode;
use crate::isa::opcodes::Opcode;

/// A 32-bit word interpreted as an LC-2K instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Instruction(pub Word);

impl Default for Instruction {
    fn default() -> Self {
        Self::NOOP
    }
}

impl From<Word> for Instruction {
    fn from(word: Word) -> Self {
        Self(word)
    }
}

impl Instruction {
    /// The canonical `noop` encoding.
    pub const NOOP: Instruction = Instruction(NOOP_INSTRUCTION);

    /// Raw encoding.
    #[inline]
    pub fn word(self) -> Word {
        self.0
    }

    /// Returns `true` for `.fill` data words (bits 31-25 not clear).
    #[inline]
    pub fn is_data(self) -> bool {
        !decode::is_instruction(self.0)
    }

    /// Opcode as encoded, or `None` for data words.
    pub fn encoded_opcode(self) -> Option<Opcode> {
        if self.is_data() {
            None
        } else {
            Some(Opcode::from_word(self.0))
        }
    }

    /// Opcode that drives the pipeline. Data words behave as `noop`.
    pub fn opcode(self) -> Opcode {
        self.encoded_opcode().unwrap_or(Opcode::Noop)
    }

    /// `regA` field.
    #[inline]
    pub fn reg_a(self) -> usize {
        decode::field_a(self.0)
    }

    /// `regB` field.
    #[inline]
    pub fn reg_b(self) -> usize {
        decode::field_b(self.0)
    }

    /// Sign-extended 16-bit offset.
    #[inline]
    pub fn offset(self) -> Word {
        decode::offset(self.0)
    }

    /// Returns `true` for `lw`.
    #[inline]
    pub fn is_load(self) -> bool {
        self.opcode() == Opcode::Lw
    }

    /// Returns `true` for a taken-or-not `beq`.
    #[inline]
    pub fn is_branch(self) -> bool {
        self.opcode() == Opcode::Beq
    }

    /// Returns `true` for `halt`.
    #[inline]
    pub fn is_halt(self) -> bool {
        self.opcode() == Opcode::Halt
    }

    /// Register written in WB, if any.
    ///
    /// `add`/`nor` write bits 2-0 of the offset field; `lw` writes `regB`.
    pub fn dest_reg(self) -> Option<usize> {
        match self.opcode() {
            Opcode::Add | Opcode::Nor => Some(decode::dest_field(self.0)),
            Opcode::Lw => Some(self.reg_b()),
            _ => None,
        }
    }

    /// Registers read in ID, in operand order.
    pub fn source_regs(self) -> [Option<usize>; 2] {
        match self.opcode() {
            Opcode::Add | Opcode::Nor | Opcode::Sw | Opcode::Beq => {
                [Some(self.reg_a()), Some(self.reg_b())]
            }
            Opcode::Lw => [Some(self.reg_a()), None],
            Opcode::Jalr | Opcode::Halt | Opcode::Noop => [None, None],
        }
    }

    /// Returns `true` when this instruction reads `reg` in ID.
    pub fn reads(self, reg: usize) -> bool {
        self.source_regs().contains(&Some(reg))
    }
}
