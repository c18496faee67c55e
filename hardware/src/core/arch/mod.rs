//! LC-2K architectural state.
//!
//! This module contains the programmer-visible storage of the machine:
//! the register file and the word-addressed memories.

/// General-Purpose Register file implementation.
pub mod gpr;

/// Word-addressed instruction and data memory.
pub mod memory;

pub use gpr::Gpr;
pub use memory::Memory;
