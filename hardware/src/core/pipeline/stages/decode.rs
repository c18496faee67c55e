//! Instruction Decode (ID) Stage.
//!
//! Reads the register file and sign-extends the offset. The load-use
//! check happens before this stage runs; a stalled cycle never calls it.

use tracing::trace;

use crate::core::arch::Gpr;
use crate::core::pipeline::latches::{IdEx, IfId};
use crate::isa::Opcode;

/// Decodes the instruction held in IF/ID.
///
/// Fields the opcode does not use keep their value from `prev`:
/// `pcPlus1` is not copied for `noop`, `readRegA` is read for opcodes
/// `add` through `jalr`, and `readRegB` only for opcodes that read `regB`.
pub fn decode_stage(if_id: &IfId, prev: &IdEx, regs: &Gpr) -> IdEx {
    let instr = if_id.instr;
    let op = instr.encoded_opcode();

    let mut id_ex = IdEx {
        instr,
        offset: instr.offset(),
        fetch_fault: if_id.fetch_fault,
        ..*prev
    };

    if op != Some(Opcode::Noop) {
        id_ex.pc_plus1 = if_id.pc_plus1;
    }
    if matches!(
        op,
        Some(Opcode::Add | Opcode::Nor | Opcode::Lw | Opcode::Sw | Opcode::Beq | Opcode::Jalr)
    ) {
        id_ex.read_reg_a = regs.read(instr.reg_a());
    }
    if matches!(op, Some(Opcode::Add | Opcode::Nor | Opcode::Sw | Opcode::Beq)) {
        id_ex.read_reg_b = regs.read(instr.reg_b());
    }

    trace!(instr = %instr, a = id_ex.read_reg_a, b = id_ex.read_reg_b, "ID");
    id_ex
}
