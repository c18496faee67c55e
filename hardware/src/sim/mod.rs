//! Simulation harness.
//!
//! Everything between the command line and the processor core: reading
//! the program image, printing the machine state, and producing the final
//! report.

/// Program image loader.
pub mod loader;

/// Final-state report for machine-readable output.
pub mod report;

/// Top-level run loop.
pub mod simulator;

/// Machine state printer.
pub mod trace;

pub use simulator::Simulator;
