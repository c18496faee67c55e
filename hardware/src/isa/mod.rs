//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the LC-2K opcodes, the field extraction helpers used by every
//! pipeline stage, and the disassembler used by the state printer.
//!
//! # Encoding
//!
//! * bits 24-22: opcode
//! * bits 21-19: `regA`
//! * bits 18-16: `regB`
//! * bits 15-0: offset (`lw`, `sw`, `beq`) or destination in bits 2-0 (`add`, `nor`)

/// Pure field extraction over a 32-bit word.
pub mod decode;

/// Instruction disassembler for the trace printer and diagnostics.
pub mod disasm;

/// Instruction wrapper answering register read/write queries.
pub mod instruction;

/// Opcode enumeration.
pub mod opcodes;

pub use instruction::Instruction;
pub use opcodes::Opcode;
