//! Instruction pipeline implementation.
//!
//! This module contains the five-stage instruction pipeline (fetch, decode,
//! execute, memory, writeback), pipeline latches for inter-stage communication,
//! hazard detection and forwarding logic, and control signals.

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB, WB/END).
pub mod latches;

/// Control signals generated from the opcode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Common latch interface.
pub mod traits;

pub use hazards::{ForwardSource, HazardDetection, IssueHistory};
pub use latches::{ExMem, IdEx, IfId, MemWb, PipelineLatches, WbEnd};
pub use traits::PipelineLatch;
