//! Memory Access Types.
//!
//! This module defines the classification of memory accesses. The pipeline
//! uses it to report which stage touched memory when an address falls
//! outside the simulated arrays.

use std::fmt;

/// Type of memory access operation.
///
/// Distinguishes instruction fetches (IF stage), data reads (LW in MEM)
/// and data writes (SW in MEM).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Also used for taken-branch targets, which become the next fetch
    /// address.
    Fetch,

    /// Data read access performed by `lw`.
    Read,

    /// Data write access performed by `sw`.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessType::Fetch => "fetch",
            AccessType::Read => "load",
            AccessType::Write => "store",
        };
        f.write_str(name)
    }
}
