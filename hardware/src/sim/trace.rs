//! Machine state printer.
//!
//! Produces the plain-text trace expected by LC-2K grading harnesses: the
//! instruction-memory listing after loading, a full state dump before every
//! cycle, and the halt summary. Latch fields that carry no meaning for the
//! instruction they accompany are annotated with `(Don't Care)`.

use std::fmt;
use std::io::{self, Write};

use crate::common::Word;
use crate::core::Cpu;
use crate::isa::{Instruction, Opcode};

const DONT_CARE: &str = " (Don't Care)";

/// Annotation suffix for a field.
fn dont_care(flag: bool) -> &'static str {
    if flag {
        DONT_CARE
    } else {
        ""
    }
}

/// Whether `op` is the exact encoded opcode (data words never match).
fn is_op(inst: Instruction, op: Opcode) -> bool {
    inst.encoded_opcode() == Some(op)
}

/// Whether the encoded opcode is `at_least` or higher, counting data words
/// as out of range.
fn op_at_least(inst: Instruction, at_least: Opcode) -> bool {
    inst.encoded_opcode()
        .map_or(true, |op| op as u8 >= at_least as u8)
}

/// Writes the listing printed while the program is loaded.
pub fn write_instruction_memory<W: Write>(out: &mut W, image: &[Word]) -> io::Result<()> {
    writeln!(out, "instruction memory:")?;
    for (address, &word) in image.iter().enumerate() {
        writeln!(
            out,
            "\tinstrMem[ {address} ]\t= 0x{:08x}\t= {word}\t= {}",
            word as u32,
            Instruction(word)
        )?;
    }
    Ok(())
}

/// Full machine state, rendered with [`fmt::Display`].
pub struct StateDump<'a>(pub &'a Cpu);

impl fmt::Display for StateDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cpu = self.0;
        let l = &cpu.latches;

        writeln!(f, "\n@@@")?;
        writeln!(f, "state before cycle {} starts:", cpu.cycles)?;
        writeln!(f, "\tpc = {}", cpu.pc)?;

        writeln!(f, "\tdata memory:")?;
        for (i, value) in cpu.dmem.prefix(cpu.program_len).iter().enumerate() {
            writeln!(f, "\t\tdataMem[ {i} ] = {value}")?;
        }
        writeln!(f, "\tregisters:")?;
        for (i, value) in cpu.regs.as_slice().iter().enumerate() {
            writeln!(f, "\t\treg[ {i} ] = {value}")?;
        }

        let inst = l.if_id.instr;
        writeln!(f, "\tIF/ID pipeline register:")?;
        writeln!(f, "\t\tinstruction = {} ( {} )", inst.word(), inst)?;
        writeln!(f, "\t\tpcPlus1 = {}{}", l.if_id.pc_plus1, dont_care(is_op(inst, Opcode::Noop)))?;

        let inst = l.id_ex.instr;
        writeln!(f, "\tID/EX pipeline register:")?;
        writeln!(f, "\t\tinstruction = {} ( {} )", inst.word(), inst)?;
        writeln!(f, "\t\tpcPlus1 = {}{}", l.id_ex.pc_plus1, dont_care(is_op(inst, Opcode::Noop)))?;
        writeln!(
            f,
            "\t\treadRegA = {}{}",
            l.id_ex.read_reg_a,
            dont_care(op_at_least(inst, Opcode::Halt))
        )?;
        writeln!(
            f,
            "\t\treadRegB = {}{}",
            l.id_ex.read_reg_b,
            dont_care(is_op(inst, Opcode::Lw) || op_at_least(inst, Opcode::Jalr))
        )?;
        let uses_offset = matches!(
            inst.encoded_opcode(),
            Some(Opcode::Lw | Opcode::Sw | Opcode::Beq)
        );
        writeln!(f, "\t\toffset = {}{}", l.id_ex.offset, dont_care(!uses_offset))?;

        let inst = l.ex_mem.instr;
        let not_beq = !is_op(inst, Opcode::Beq);
        writeln!(f, "\tEX/MEM pipeline register:")?;
        writeln!(f, "\t\tinstruction = {} ( {} )", inst.word(), inst)?;
        writeln!(f, "\t\tbranchTarget {}{}", l.ex_mem.branch_target, dont_care(not_beq))?;
        writeln!(
            f,
            "\t\teq ? {}{}",
            if l.ex_mem.eq { "True" } else { "False" },
            dont_care(not_beq)
        )?;
        writeln!(
            f,
            "\t\taluResult = {}{}",
            l.ex_mem.alu_result,
            dont_care(op_at_least(inst, Opcode::Beq))
        )?;
        writeln!(
            f,
            "\t\treadRegB = {}{}",
            l.ex_mem.read_reg_b,
            dont_care(!is_op(inst, Opcode::Sw))
        )?;

        let inst = l.mem_wb.instr;
        writeln!(f, "\tMEM/WB pipeline register:")?;
        writeln!(f, "\t\tinstruction = {} ( {} )", inst.word(), inst)?;
        writeln!(
            f,
            "\t\twriteData = {}{}",
            l.mem_wb.write_data,
            dont_care(op_at_least(inst, Opcode::Sw))
        )?;

        let inst = l.wb_end.instr;
        writeln!(f, "\tWB/END pipeline register:")?;
        writeln!(f, "\t\tinstruction = {} ( {} )", inst.word(), inst)?;
        writeln!(
            f,
            "\t\twriteData = {}{}",
            l.wb_end.write_data,
            dont_care(op_at_least(inst, Opcode::Sw))
        )?;

        writeln!(f, "end state")
    }
}

/// Writes the halt summary followed by the final state dump.
pub fn write_halt_report<W: Write>(out: &mut W, cpu: &Cpu) -> io::Result<()> {
    writeln!(out, "Machine halted")?;
    writeln!(out, "Total of {} cycles executed", cpu.cycles)?;
    writeln!(out, "Final state of machine:")?;
    write!(out, "{}", StateDump(cpu))
}
