//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. LC-2K
//! only needs two operations: wrapping addition (for `add` and for address
//! generation) and bitwise NOR.

use crate::common::Word;
use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit (ALU) for integer operations.
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a` - First operand (`regA`)
    /// * `b` - Second operand (`regB`, or the offset for `lw`/`sw`)
    ///
    /// # Returns
    ///
    /// The 32-bit result. Addition wraps on overflow.
    pub fn execute(op: AluOp, a: Word, b: Word) -> Word {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Nor => !(a | b),
        }
    }
}
