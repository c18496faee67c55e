//! LC-2K opcodes.

use std::fmt;

use crate::common::Word;
use crate::isa::decode;

/// The eight LC-2K opcodes, numbered as encoded in bits 24-22.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `add regA regB dest`: `reg[dest] = reg[regA] + reg[regB]`.
    Add = 0,
    /// `nor regA regB dest`: `reg[dest] = !(reg[regA] | reg[regB])`.
    Nor = 1,
    /// `lw regA regB offset`: `reg[regB] = mem[reg[regA] + offset]`.
    Lw = 2,
    /// `sw regA regB offset`: `mem[reg[regA] + offset] = reg[regB]`.
    Sw = 3,
    /// `beq regA regB offset`: branch to `pc + 1 + offset` when equal.
    Beq = 4,
    /// Reserved. Decoded but executed as a no-op.
    Jalr = 5,
    /// Stops the machine once it reaches MEM/WB.
    Halt = 6,
    /// No operation.
    Noop = 7,
}

impl Opcode {
    /// Maps a 3-bit opcode number to its variant.
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0x7 {
            0 => Opcode::Add,
            1 => Opcode::Nor,
            2 => Opcode::Lw,
            3 => Opcode::Sw,
            4 => Opcode::Beq,
            5 => Opcode::Jalr,
            6 => Opcode::Halt,
            _ => Opcode::Noop,
        }
    }

    /// Extracts the opcode of an instruction word.
    pub fn from_word(word: Word) -> Self {
        Self::from_bits(decode::opcode(word))
    }

    /// Lower-case mnemonic as written in assembly.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Nor => "nor",
            Opcode::Lw => "lw",
            Opcode::Sw => "sw",
            Opcode::Beq => "beq",
            Opcode::Jalr => "jalr",
            Opcode::Halt => "halt",
            Opcode::Noop => "noop",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
