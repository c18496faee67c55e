//! Simulator configuration.
//!
//! Configuration is read from a TOML file with three sections:
//!
//! ```toml
//! [general]
//! trace_state = true
//! max_cycles = 0
//!
//! [memory]
//! size = 65536
//!
//! [pipeline]
//! hazard_detection = "latch-compare"
//! ```
//!
//! Every field has a default, so an empty file (or no file) is valid.
//! Command-line flags override individual fields after loading.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{SimError, DEFAULT_MEMORY_SIZE};
use crate::core::pipeline::HazardDetection;

/// Top-level simulator configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Output and run-limit settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory geometry.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline policy.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Print the full machine state before every cycle.
    #[serde(default = "default_trace_state")]
    pub trace_state: bool,
    /// Abort after this many cycles. `0` disables the limit.
    #[serde(default)]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_state: default_trace_state(),
            max_cycles: 0,
        }
    }
}

impl GeneralConfig {
    /// Whether per-cycle dumps are printed.
    ///
    /// Builds with the `always-trace` feature print them unconditionally.
    pub fn trace_enabled(&self) -> bool {
        cfg!(feature = "always-trace") || self.trace_state
    }

    /// The cycle limit, or `None` when unlimited.
    pub fn cycle_limit(&self) -> Option<u64> {
        (self.max_cycles != 0).then_some(self.max_cycles)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Depth of instruction and data memory, in words.
    #[serde(default = "default_memory_size")]
    pub size: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: default_memory_size(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Load-use detector implementation.
    #[serde(default)]
    pub hazard_detection: HazardDetection,
}

impl Config {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the text is not valid TOML or names an
    /// unknown field.
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

fn default_trace_state() -> bool {
    true
}

fn default_memory_size() -> usize {
    DEFAULT_MEMORY_SIZE
}
