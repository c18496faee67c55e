//! Execute (EX) Stage.
//!
//! Resolves operands through the forwarding network, runs the ALU and
//! resolves `beq`.

use tracing::{debug, trace};

use crate::core::pipeline::hazards::{forward_rs, ForwardSource, ForwardedOperands};
use crate::core::pipeline::latches::{ExMem, IdEx, MemWb, WbEnd};
use crate::core::pipeline::signals::ControlSignals;
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;

/// EX output: the new EX/MEM latch plus the operand sources it used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecuteResult {
    /// Latch written by EX.
    pub latch: ExMem,
    /// Forwarded operand values and where they came from.
    pub operands: ForwardedOperands,
}

/// Executes the instruction held in ID/EX.
///
/// `ex_mem`, `mem_wb` and `wb_end` are the latches as they stood at the
/// start of the cycle. `ex_mem` is also the previous value of the latch
/// being produced, so fields the opcode does not compute are carried over.
pub fn execute_stage(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb, wb_end: &WbEnd) -> ExecuteResult {
    let instr = id_ex.instr;
    let ctrl = ControlSignals::for_instruction(instr);
    let operands = forward_rs(id_ex, ex_mem, mem_wb, wb_end);

    for (operand, src) in [("regA", operands.a_src), ("regB", operands.b_src)] {
        if src != ForwardSource::NoForward {
            debug!(instr = %instr, operand, source = ?src, "forward");
        }
    }

    let mut latch = ExMem {
        instr,
        branch_target: Bru::target(id_ex.pc_plus1, id_ex.offset),
        eq: Bru::taken(ctrl.branch, operands.a, operands.b),
        fetch_fault: id_ex.fetch_fault,
        ..*ex_mem
    };

    if let Some(op) = ctrl.alu {
        let rhs = if ctrl.alu_src_offset {
            id_ex.offset
        } else {
            operands.b
        };
        latch.alu_result = Alu::execute(op, operands.a, rhs);
    }
    if ctrl.mem_write {
        latch.read_reg_b = operands.b;
    }

    trace!(instr = %instr, alu = latch.alu_result, eq = latch.eq, "EX");
    ExecuteResult { latch, operands }
}
