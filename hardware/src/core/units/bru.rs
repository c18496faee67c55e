//! Branch Resolution Unit (BRU).
//!
//! The pipeline predicts every branch not-taken. `beq` is resolved at the
//! end of EX: the target is always computed, and the outcome is latched
//! into EX/MEM where the next cycle acts on it.

use crate::common::Word;

/// Branch resolution for `beq`.
pub struct Bru;

impl Bru {
    /// Computes `pcPlus1 + offset` with 32-bit wrapping.
    #[inline]
    pub fn target(pc_plus1: Word, offset: Word) -> Word {
        pc_plus1.wrapping_add(offset)
    }

    /// Returns `true` when a branch with operands `a` and `b` is taken.
    ///
    /// `is_branch` is false for every non-`beq` instruction, which never
    /// redirects fetch.
    #[inline]
    pub fn taken(is_branch: bool, a: Word, b: Word) -> bool {
        is_branch && a == b
    }
}
