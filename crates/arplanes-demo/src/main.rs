//! arplanes demo
//!
//! Replays a scripted plane-tracking session on the simulated device and
//! prints the resulting planes and placed models.
//!
//! Usage:
//!   arplanes-demo                   # Run with config from the default location
//!   arplanes-demo --seed 7          # Reproducible plane colors
//!   arplanes-demo --no-device       # Behave like a device without plane tracking
//!   arplanes-demo --json            # Print the final state as JSON

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arplanes::{ArPlanesConfig, AssignmentStrategy, DeviceError};
use arplanes_demo::{demo_script, render_overlay, Session};

#[derive(Parser, Debug)]
#[command(name = "arplanes-demo")]
#[command(about = "Replay a plane-tracking session and show the tracked planes", long_about = None)]
struct Cli {
    /// Config file (defaults to $ARPLANES_CONFIG, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw plane colors from a generator seeded with this value
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate an environment without AR plane tracking
    #[arg(long)]
    no_device: bool,

    /// Print the final state as JSON instead of the overlay
    #[arg(long)]
    json: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ArPlanesConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(seed) = cli.seed {
        config.palette.strategy = AssignmentStrategy::Seeded { seed };
    }
    if cli.no_device {
        config.device.available = false;
    }

    let mut session = match Session::connect(&config) {
        Ok(session) => session,
        Err(DeviceError::Unavailable(reason)) => {
            println!("AR plane tracking is not supported on this device: {}", reason);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to connect to the plane source"),
    };

    session.run(demo_script())?;
    let snapshot = session.snapshot();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &snapshot).context("Failed to write snapshot")?;
        writeln!(out)?;
    } else {
        render_overlay(&mut out, &snapshot).context("Failed to draw overlay")?;
    }

    session.shutdown();
    Ok(())
}
