//! Pipeline latch interface.
//!
//! Every inter-stage register carries an instruction word. Stalls and
//! branch squashes turn a latch into a bubble by replacing that word with
//! `noop`; the remaining fields keep whatever they last held so that the
//! state dump stays deterministic.

use crate::isa::{Instruction, Opcode};

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch {
    /// The instruction currently held.
    fn instr(&self) -> Instruction;

    /// Turns the latch into a bubble.
    ///
    /// Only the instruction (and, for EX/MEM, the branch outcome) is
    /// cleared.
    fn squash(&mut self);

    /// Returns `true` if the latch holds a `noop`.
    ///
    /// Data words are not bubbles even though they execute as `noop`.
    fn is_bubble(&self) -> bool {
        self.instr().encoded_opcode() == Some(Opcode::Noop)
    }
}
