//! Wearsim - Wearable physics calculators
//!
//! Runs one or more calculators and prints their reports.
//!
//! # Usage
//!
//! ```bash
//! wearsim fermi thermal
//! wearsim power-density --iterations 500 --supply 3.0
//! wearsim sequinoid --seed 7 --dt 0.5m --duration 2 --json
//! wearsim --all --config sweep.json > reports.txt
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use wearable_sims::{
    config::validate_config,
    error::{Result, SimError},
    report::{write_reports, OutputFormat},
    simulations::run_all,
    units::parse_value_strict,
    RunConfig, Simulation,
};

/// Wearable physics calculators
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Calculators to run, by name (see --list)
    #[arg(
        value_name = "SIMULATION",
        value_parser = Simulation::from_name,
        required_unless_present_any = ["all", "list"]
    )]
    simulations: Vec<Simulation>,

    /// Run every calculator
    #[arg(short, long, conflicts_with = "simulations")]
    all: bool,

    /// List available calculators and exit
    #[arg(short, long)]
    list: bool,

    /// Emit reports as a JSON array instead of text tables
    #[arg(long)]
    json: bool,

    /// Load solver settings from a JSON file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Jacobi sweeps for the power mesh
    #[arg(long)]
    iterations: Option<usize>,

    /// Mesh supply voltage (accepts SI suffixes, e.g. 3.3 or 3300m)
    #[arg(long, value_parser = parse_si)]
    supply: Option<f64>,

    /// Kuramoto RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of Kuramoto oscillators
    #[arg(long)]
    oscillators: Option<usize>,

    /// Kuramoto time step in seconds (e.g. 1m)
    #[arg(long, value_parser = parse_si)]
    dt: Option<f64>,

    /// Kuramoto duration in seconds
    #[arg(long, value_parser = parse_si)]
    duration: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_si(text: &str) -> std::result::Result<f64, SimError> {
    parse_value_strict(text)
}

impl Args {
    /// Initialize logging on stderr based on verbosity level
    fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Build the run configuration: file first, then flag overrides.
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        let relax = &mut config.relaxation;
        if let Some(iterations) = self.iterations {
            relax.iterations = iterations;
        }
        if let Some(supply) = self.supply {
            relax.supply_voltage = supply;
        }

        let kura = &mut config.kuramoto;
        if let Some(seed) = self.seed {
            kura.seed = seed;
        }
        if let Some(oscillators) = self.oscillators {
            kura.oscillators = oscillators;
        }
        if let Some(dt) = self.dt {
            kura.dt = dt;
        }
        if let Some(duration) = self.duration {
            kura.duration = duration;
        }

        validate_config(&config)?;
        Ok(config)
    }

    fn selection(&self) -> Vec<Simulation> {
        if self.all {
            Simulation::ALL.to_vec()
        } else {
            self.simulations.clone()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.init_logging();

    if args.list {
        for sim in Simulation::ALL {
            println!("{:<16} {:<28} {}", sim.name(), sim.alias(), sim.description());
        }
        return Ok(());
    }

    let config = args.run_config()?;
    let selection = args.selection();
    info!(count = selection.len(), "running calculators");

    let reports = run_all(&selection, &config)?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    write_reports(&reports, format)
}
