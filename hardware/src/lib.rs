//! LC-2K Pipeline Simulator Library.
//!
//! This crate implements a cycle-accurate simulator for a five-stage, in-order
//! pipelined implementation of the LC-2K instruction set. It reproduces the
//! architectural and micro-architectural state (registers, memory, every
//! pipeline latch) cycle by cycle, including load-use stalls, data
//! forwarding and branch squashing.
//!
//! # Architecture
//!
//! * **Core**: 5-stage in-order pipeline (Fetch, Decode, Execute, Memory, Writeback)
//!   plus a WB/END latch feeding the oldest forwarding path.
//! * **Hazards**: one-cycle load-use stall, full forwarding from EX/MEM, MEM/WB and WB/END.
//! * **Branches**: predict-not-taken, resolved in EX, three-cycle squash.
//!
//! # Modules
//!
//! * `common`: Shared types, constants, and error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Simulation harness, loader and state printer.
//! * `stats`: Performance statistics collection.

/// Shared types, constants and error handling.
///
/// Provides the machine word type and the error type used throughout the
/// simulator.
pub mod common;

/// Configuration system for memory and pipeline settings.
///
/// Loads and parses TOML configuration files; every field has a default.
pub mod config;

/// CPU core implementation including pipeline stages and execution units.
pub mod core;

/// Instruction Set Architecture definitions, decoder and disassembler.
pub mod isa;

/// Simulation harness, program loader and trace output.
pub mod sim;

/// Performance statistics collection and reporting.
pub mod stats;
