//! Simulator error definitions.
//!
//! Every failure ends the run; there are no retries. The taxonomy is:
//! 1. **Load errors:** the program image cannot be read or parsed.
//! 2. **Addressing errors:** a fetch, load, store or branch target falls
//!    outside memory.
//! 3. **Configuration errors:** the TOML configuration is unreadable or invalid.
//! 4. **Run limits:** the program did not halt within the configured cycle budget.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::data::AccessType;

/// Errors raised while loading or running a program.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program image or configuration file could not be read.
    #[error("can't open file {}: {source}", path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line of the program image does not start with a 32-bit integer.
    #[error("error in reading address {address}: `{line}` is not a 32-bit integer")]
    MalformedLine {
        /// Address the line would have been loaded at.
        address: usize,
        /// The offending line, without its terminator.
        line: String,
    },

    /// The program image has more words than memory can hold.
    #[error("program has {words} words but memory holds only {capacity}")]
    ProgramTooLarge {
        /// Number of words in the image.
        words: usize,
        /// Memory depth in words.
        capacity: usize,
    },

    /// A memory access fell outside the simulated array.
    #[error("{access} address {address} is outside memory (size {size})")]
    AddressOutOfBounds {
        /// Kind of access that faulted.
        access: AccessType,
        /// The faulting word address.
        address: i64,
        /// Memory depth in words.
        size: usize,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Trace or report output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// The program ran past the configured cycle budget without halting.
    #[error("program did not halt within {0} cycles")]
    CycleLimitExceeded(u64),
}
