//! Instruction Fetch (IF) Stage.
//!
//! Reads instruction memory at `pc` and advances `pc` sequentially. Branch
//! redirection is not handled here: a taken branch overrides `pc` in the
//! cycle driver and IF does not run that cycle.
//!
//! A fetch outside instruction memory does not fault immediately. IF keeps
//! running while `halt` drains and down the not-taken path of a branch, so
//! the stage latches a poisoned bubble instead and holds `pc`. The cycle
//! driver raises the fault only if that bubble reaches MEM.

use tracing::{debug, trace};

use crate::common::{AccessType, Word};
use crate::core::arch::Memory;
use crate::core::pipeline::latches::IfId;
use crate::isa::{Instruction, Opcode};

/// Fetches the instruction at `pc`.
///
/// `prev` is the IF/ID latch from the previous cycle; `pcPlus1` is left
/// untouched when the fetched word is a `noop`.
///
/// # Returns
///
/// The new IF/ID latch and the next `pc`.
pub fn fetch_stage(pc: Word, prev: &IfId, imem: &Memory) -> (IfId, Word) {
    let word = match imem.read(pc, AccessType::Fetch) {
        Ok(word) => word,
        Err(_) => {
            debug!(pc, "fetch outside instruction memory, latching poisoned bubble");
            let if_id = IfId {
                instr: Instruction::NOOP,
                fetch_fault: Some(pc),
                ..*prev
            };
            return (if_id, pc);
        }
    };

    let instr = Instruction(word);
    let pc_plus1 = pc.wrapping_add(1);

    let mut if_id = IfId {
        instr,
        fetch_fault: None,
        ..*prev
    };
    if instr.encoded_opcode() != Some(Opcode::Noop) {
        if_id.pc_plus1 = pc_plus1;
    }

    trace!(pc, instr = %instr, "IF");
    (if_id, pc_plus1)
}
