//! Pipeline stage implementations.
//!
//! Each stage is a pure function from the latches at the start of a cycle
//! to the latch it produces:
//! - Fetch: reads instruction memory and advances `pc`
//! - Decode: reads the register file
//! - Execute: forwards operands, runs the ALU, resolves `beq`
//! - Memory: performs loads and produces store requests
//! - Writeback: produces register writes
//!
//! Register and memory writes are returned, not applied; the cycle driver
//! commits them once every stage has run.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::{execute_stage, ExecuteResult};
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
