//! Top-level simulation loop.
//!
//! [`Simulator`] owns the [`Cpu`] together with the run options taken from
//! the configuration, and streams the trace to any [`Write`] sink.

use std::io::Write;

use tracing::info;

use crate::common::{SimError, Word};
use crate::config::Config;
use crate::core::Cpu;
use crate::sim::trace::{write_halt_report, write_instruction_memory, StateDump};

/// A loaded program ready to run.
pub struct Simulator {
    /// The machine being simulated.
    pub cpu: Cpu,
    trace_state: bool,
    max_cycles: Option<u64>,
}

impl Simulator {
    /// Builds a simulator for `image` from `config`.
    ///
    /// # Errors
    ///
    /// [`SimError::ProgramTooLarge`] if the image does not fit in memory.
    pub fn new(config: &Config, image: &[Word]) -> Result<Self, SimError> {
        info!(
            memory = config.memory.size,
            hazard_detection = ?config.pipeline.hazard_detection,
            "initialising simulator"
        );
        Ok(Self {
            cpu: Cpu::with_program(config, image)?,
            trace_state: config.general.trace_enabled(),
            max_cycles: config.general.cycle_limit(),
        })
    }

    /// Runs to halt, writing the trace to `out`.
    ///
    /// When tracing is enabled the instruction-memory listing and a state
    /// dump before every cycle are written. The halt summary and final
    /// state are written only if `final_dump` is set.
    ///
    /// # Returns
    ///
    /// The number of cycles executed.
    pub fn run<W: Write>(&mut self, out: &mut W, final_dump: bool) -> Result<u64, SimError> {
        let trace_state = self.trace_state;
        if trace_state {
            let image = self.cpu.imem.prefix(self.cpu.program_len);
            write_instruction_memory(out, image)?;
        }

        let cycles = self.cpu.run(self.max_cycles, |cpu| {
            if trace_state {
                write!(out, "{}", StateDump(cpu))?;
            }
            Ok(())
        })?;

        if final_dump {
            write_halt_report(out, &self.cpu)?;
        }
        out.flush()?;
        Ok(cycles)
    }
}
