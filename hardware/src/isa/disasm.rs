//! Instruction disassembler.
//!
//! Renders a word the way the reference trace does: `add 1 2 3`,
//! `lw 0 1 -4`, `jalr 4 5`, `halt`, `noop`, or `.fill N` for data words.
//! The `add`/`nor` third operand is the sign-extended 16-bit field, not
//! the masked destination register.

use std::fmt;

use crate::common::Word;
use crate::isa::decode;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::Opcode;

/// Disassembles a word into assembly text.
pub fn disassemble(word: Word) -> String {
    Instruction(word).to_string()
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = self.word();
        let Some(op) = self.encoded_opcode() else {
            return write!(f, ".fill {word}");
        };
        match op {
            Opcode::Add | Opcode::Nor | Opcode::Lw | Opcode::Sw | Opcode::Beq => write!(
                f,
                "{} {} {} {}",
                op,
                decode::field_a(word),
                decode::field_b(word),
                decode::offset(word)
            ),
            Opcode::Jalr => write!(f, "{} {} {}", op, decode::field_a(word), decode::field_b(word)),
            Opcode::Halt | Opcode::Noop => write!(f, "{op}"),
        }
    }
}
