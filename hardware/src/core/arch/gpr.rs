//! LC-2K General-Purpose Register File.
//!
//! Eight 32-bit registers, `reg[0]` through `reg[7]`. Unlike RISC-V there is
//! no hardwired zero register: `reg[0]` is writable like any other.

use serde::Serialize;

use crate::common::{Word, NUM_REGS};

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Gpr {
    regs: [Word; NUM_REGS],
}

impl Gpr {
    /// Creates a register file with all registers cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// The index is masked to three bits, so any decoded field is valid.
    #[inline]
    pub fn read(&self, idx: usize) -> Word {
        self.regs[idx % NUM_REGS]
    }

    /// Writes a register. The index is masked like [`Gpr::read`].
    #[inline]
    pub fn write(&mut self, idx: usize, val: Word) {
        self.regs[idx % NUM_REGS] = val;
    }

    /// All registers in index order.
    pub fn as_slice(&self) -> &[Word] {
        &self.regs
    }
}
