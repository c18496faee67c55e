//! Writeback (WB) Stage.
//!
//! Produces the register write for `add`, `nor` and `lw` and moves the
//! instruction into WB/END, the oldest forwarding source.

use tracing::trace;

use crate::core::pipeline::latches::{MemWb, WbEnd};
use crate::core::pipeline::signals::{ControlSignals, RegWrite};

/// Executes the writeback stage for the instruction held in MEM/WB.
pub fn wb_stage(mem_wb: &MemWb) -> (WbEnd, Option<RegWrite>) {
    let instr = mem_wb.instr;
    let ctrl = ControlSignals::for_instruction(instr);

    let write = if ctrl.reg_write {
        instr.dest_reg().map(|reg| RegWrite {
            reg,
            value: mem_wb.write_data,
        })
    } else {
        None
    };

    if let Some(w) = write {
        trace!(reg = w.reg, value = w.value, "WB");
    }

    let wb_end = WbEnd {
        instr,
        write_data: mem_wb.write_data,
    };
    (wb_end, write)
}
