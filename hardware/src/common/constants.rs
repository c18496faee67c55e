//! Global Machine Constants.
//!
//! This module defines machine-wide constants used across the simulator:
//! 1. **Word Type:** The signed 32-bit machine word stored in registers and memory.
//! 2. **Machine Sizes:** Register count and default memory depth.
//! 3. **Encodings:** The canonical NOOP word used to seed and squash latches.

/// Machine word. Registers, memory cells and latch fields all hold one.
pub type Word = i32;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;

/// Default depth of instruction and data memory, in words.
pub const DEFAULT_MEMORY_SIZE: usize = 65536;

/// Bit position of the opcode field.
pub const OPCODE_SHIFT: u32 = 22;

/// Encoding of `noop` (opcode 7, all other fields zero).
pub const NOOP_INSTRUCTION: Word = 7 << OPCODE_SHIFT;

/// Number of pipeline stages between fetch and branch resolution.
///
/// A taken branch squashes this many younger instructions.
pub const BRANCH_PENALTY: u64 = 3;
