//! LC-2K Pipeline Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, configuration, logging setup and the simulation run.
//!
//! # Usage
//!
//! ```text
//! lc2k-sim program.mc                      # full per-cycle trace
//! lc2k-sim --quiet --stats program.mc      # final state and statistics only
//! lc2k-sim --json program.mc               # final state as JSON
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=debug` to see
//! stalls, forwards and flushes.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lc2k_pipeline::common::SimError;
use lc2k_pipeline::config::Config;
use lc2k_pipeline::core::pipeline::HazardDetection;
use lc2k_pipeline::sim::loader;
use lc2k_pipeline::sim::report::FinalState;
use lc2k_pipeline::sim::Simulator;

/// Command-line arguments for the LC-2K pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-accurate LC-2K pipeline simulator")]
struct Args {
    /// Machine-code file: one decimal word per line.
    program: PathBuf,

    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suppress the instruction listing and per-cycle state dumps.
    #[arg(short, long)]
    quiet: bool,

    /// Abort if the program has not halted after this many cycles (0 = no limit).
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Load-use hazard detector.
    #[arg(long, value_enum)]
    hazard_detection: Option<HazardDetection>,

    /// Print the statistics report after the run.
    #[arg(long)]
    stats: bool,

    /// Print the final state as JSON instead of the text dump.
    #[arg(long)]
    json: bool,
}

/// Loads the configuration and applies command-line overrides.
fn build_config(args: &Args) -> Result<Config, SimError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if args.quiet || args.json {
        config.general.trace_state = false;
    }
    if let Some(max_cycles) = args.max_cycles {
        config.general.max_cycles = max_cycles;
    }
    if let Some(detector) = args.hazard_detection {
        config.pipeline.hazard_detection = detector;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = build_config(args)?;
    let image = loader::load_program(&args.program)?;
    let mut sim = Simulator::new(&config, &image)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    sim.run(&mut out, !args.json)?;

    if args.json {
        let json = FinalState::capture(&sim.cpu)
            .to_json()
            .map_err(io::Error::from)?;
        writeln!(out, "{json}")?;
    }
    if args.stats {
        sim.cpu.stats.print();
    }
    Ok(())
}

/// Main entry point for the LC-2K pipeline simulator.
///
/// # Behavior
///
/// 1. **Logging**: Installs a `tracing` subscriber on stderr filtered by `RUST_LOG`.
/// 2. **Configuration**: Loads the TOML file (if any) and applies flag overrides.
/// 3. **Loader**: Reads the program image into instruction and data memory.
/// 4. **Simulation Loop**: Runs until `halt` reaches MEM/WB, printing the trace.
/// 5. **Teardown**: Prints the final state and, on request, statistics.
///
/// Exits with status 1 and an `error:` message on any failure.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        io::stdout().flush().ok();
        eprintln!("error: {e}");
        process::exit(1);
    }
}
