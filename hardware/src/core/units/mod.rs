//! Functional units used by the Execute stage.

/// Arithmetic Logic Unit (`add`, `nor`, address generation).
pub mod alu;

/// Branch Resolution Unit (`beq` target and outcome).
pub mod bru;
