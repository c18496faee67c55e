//! Memory Access (MEM) Stage.
//!
//! Performs `lw` reads against the data memory snapshot and produces the
//! `sw` write, which the cycle driver commits at the end of the cycle.

use tracing::{debug, trace};

use crate::common::{AccessType, SimError};
use crate::core::arch::Memory;
use crate::core::pipeline::latches::{ExMem, MemWb};
use crate::core::pipeline::signals::{ControlSignals, MemWrite};

/// Executes the memory stage for the instruction held in EX/MEM.
///
/// `writeData` keeps its value from `prev` unless the instruction writes a
/// register.
///
/// # Errors
///
/// [`SimError::AddressOutOfBounds`] if a load or store address lies
/// outside data memory.
pub fn mem_stage(
    ex_mem: &ExMem,
    prev: &MemWb,
    dmem: &Memory,
) -> Result<(MemWb, Option<MemWrite>), SimError> {
    let instr = ex_mem.instr;
    let ctrl = ControlSignals::for_instruction(instr);
    let mut mem_wb = MemWb { instr, ..*prev };
    let mut store = None;

    if ctrl.mem_read {
        mem_wb.write_data = dmem.read(ex_mem.alu_result, AccessType::Read)?;
        debug!(addr = ex_mem.alu_result, value = mem_wb.write_data, "load");
    } else if ctrl.mem_write {
        dmem.check_write(ex_mem.alu_result)?;
        store = Some(MemWrite {
            address: ex_mem.alu_result,
            value: ex_mem.read_reg_b,
        });
        debug!(addr = ex_mem.alu_result, value = ex_mem.read_reg_b, "store");
    } else if ctrl.reg_write {
        mem_wb.write_data = ex_mem.alu_result;
    }

    trace!(instr = %instr, "MEM");
    Ok((mem_wb, store))
}
