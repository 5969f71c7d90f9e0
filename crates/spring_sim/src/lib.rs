#![forbid(unsafe_code)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]

//! # Spring Sim
//!
//! Headless driver for [`simple_spring`]. It attaches a spring to a host
//! whose clock advances by a fixed delta, replays actions from the command
//! line or a script, and prints the shown value frame by frame.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p spring_sim -- -c "SpringFromTo 0 100" --until-settled
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod script;
pub mod sim;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use simple_spring::SpringSnapshot;
use tracing::{debug, info};

pub use cli::{Cli, OutputFormat};
pub use config::SimConfig;
pub use error::SimError;
pub use script::Step;
pub use sim::{Record, SimulatedHost, Simulation};

/// Runs a full simulation for parsed arguments, writing records to `out`.
///
/// # Errors
///
/// Returns an error if configuration, script or snapshot input is invalid,
/// or if output cannot be written.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let config = SimConfig::from_cli(cli)?;
    debug!(?config, "resolved configuration");

    let steps = collect_steps(cli)?;
    info!(steps = steps.len(), dt = config.dt, "starting simulation");

    let mut simulation = Simulation::new(&config);
    if let Some(path) = &cli.load {
        simulation.restore(&read_snapshot(path)?);
    }

    let records = simulation.run(&steps, config.frames);
    output::write_records(out, config.format, &records).context("failed to write output")?;
    if cli.inspect {
        let properties = simulation.spring().debug_properties();
        output::write_inspection(out, config.format, &properties)
            .context("failed to write output")?;
    }

    if let Some(path) = &cli.save {
        let json = simulation.snapshot().to_json_pretty()?;
        fs::write(path, json).map_err(|e| SimError::io(path, e))?;
        info!(path = %path.display(), "saved snapshot");
    }
    Ok(())
}

fn collect_steps(cli: &Cli) -> error::Result<Vec<Step>> {
    let mut steps = Vec::new();
    for command in &cli.commands {
        steps.extend(script::parse_command(command)?);
    }
    if let Some(path) = &cli.script {
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        steps.extend(script::parse_script(&text)?);
    }
    Ok(steps)
}

fn read_snapshot(path: &Path) -> error::Result<SpringSnapshot> {
    let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
    SpringSnapshot::from_json(&text).map_err(|source| SimError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}
