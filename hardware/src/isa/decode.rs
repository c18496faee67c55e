//! Instruction field extraction.
//!
//! Every function here is total: any 32-bit value is accepted and the
//! relevant bits are masked out. Whether the result is meaningful depends
//! on the opcode, which is the caller's concern.

pub use crate::common::constants::OPCODE_SHIFT;
use crate::common::Word;

/// Bit position of the `regA` field (bits 21-19).
pub const REG_A_SHIFT: u32 = 19;
/// Bit position of the `regB` field (bits 18-16).
pub const REG_B_SHIFT: u32 = 16;

/// Mask for a 3-bit field.
pub const FIELD3_MASK: u32 = 0x7;
/// Mask for the 16-bit offset field.
pub const IMMEDIATE_MASK: u32 = 0xFFFF;
/// Bits that must be clear for a word to be an instruction encoding.
pub const UNUSED_HIGH_MASK: u32 = 0xFE00_0000;

/// Extracts the opcode field (bits 24-22).
#[inline(always)]
pub fn opcode(word: Word) -> u32 {
    ((word as u32) >> OPCODE_SHIFT) & FIELD3_MASK
}

/// Extracts the `regA` field (bits 21-19).
#[inline(always)]
pub fn field_a(word: Word) -> usize {
    (((word as u32) >> REG_A_SHIFT) & FIELD3_MASK) as usize
}

/// Extracts the `regB` field (bits 18-16).
#[inline(always)]
pub fn field_b(word: Word) -> usize {
    (((word as u32) >> REG_B_SHIFT) & FIELD3_MASK) as usize
}

/// Extracts the trailing 16-bit field, unsigned.
#[inline(always)]
pub fn immediate_field(word: Word) -> u32 {
    (word as u32) & IMMEDIATE_MASK
}

/// Extracts the destination register of `add`/`nor` (bits 2-0).
#[inline(always)]
pub fn dest_field(word: Word) -> usize {
    ((word as u32) & FIELD3_MASK) as usize
}

/// Sign-extends the low 16 bits of `value` to a full word.
///
/// Bits above 15 are ignored.
#[inline(always)]
pub fn sign_extend16(value: u32) -> Word {
    (value & IMMEDIATE_MASK) as u16 as i16 as Word
}

/// Sign-extended offset of `lw`, `sw` and `beq`.
#[inline(always)]
pub fn offset(word: Word) -> Word {
    sign_extend16(immediate_field(word))
}

/// Returns `true` when bits 31-25 are clear.
///
/// Words with any of those bits set are data (`.fill`) and act as `noop`
/// in the pipeline.
#[inline(always)]
pub fn is_instruction(word: Word) -> bool {
    (word as u32) & UNUSED_HIGH_MASK == 0
}
