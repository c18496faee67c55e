//! Common utilities and types used throughout the LC-2K pipeline simulator.
//!
//! This module provides the machine word type, memory access
//! classification and the error type shared by the loader, the
//! pipeline stages and the command-line driver.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for loading, addressing and configuration failures.
pub mod error;

pub use constants::{Word, DEFAULT_MEMORY_SIZE, NOOP_INSTRUCTION, NUM_REGS};
pub use data::AccessType;
pub use error::SimError;
