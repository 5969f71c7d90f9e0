//! Command-line interface for `spring-sim`.
//!
//! # Examples
//!
//! ```bash
//! # Spring from 0 to 100 and print every frame
//! spring-sim -c "SpringFromTo 0 100"
//!
//! # Stiffer spring at 144 Hz, stop printing once it settles
//! spring-sim --stiffness 0.4 --dt 0.006944 -c "SpringFromTo 0 1" --until-settled
//!
//! # Replay a script and emit JSON lines
//! spring-sim --script wobble.txt --format json
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Headless spring simulator.
///
/// Feeds actions to a spring and steps it with a fixed frame delta, printing
/// the shown value for every frame.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "spring-sim",
    author,
    version,
    about = "Replay spring actions frame by frame",
    long_about = "Replays spring actions against a simulated host with a fixed frame \
                  delta and prints the interpolated value for every frame."
)]
pub struct Cli {
    /// TOML file with simulation and spring settings
    #[arg(long, env = "SPRING_SIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Spring stiffness (0.01 to 1)
    #[arg(long, allow_negative_numbers = true)]
    pub stiffness: Option<f64>,

    /// Spring damping (0 to 1)
    #[arg(long, allow_negative_numbers = true)]
    pub damping: Option<f64>,

    /// Settle precision
    #[arg(long, allow_negative_numbers = true)]
    pub precision: Option<f64>,

    /// Seconds between simulated frames [default: 1/60]
    #[arg(long)]
    pub dt: Option<f64>,

    /// Frames to run when no `tick` step is given [default: 120]
    #[arg(long, short = 'n')]
    pub frames: Option<usize>,

    /// Action to apply before running, e.g. "SpringFromTo 0 100"
    ///
    /// May be repeated. Applied in order before any script step.
    #[arg(long = "command", short = 'c', value_name = "ACTION")]
    pub commands: Vec<String>,

    /// Script file with one action or `tick <frames>` per line
    #[arg(long, short = 's')]
    pub script: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Stop each tick run as soon as the spring goes idle
    #[arg(long)]
    pub until_settled: bool,

    /// Print the spring's debugger properties after the run
    #[arg(long)]
    pub inspect: bool,

    /// Restore spring state from a JSON snapshot before running
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Write the final spring state as a JSON snapshot
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// How frames are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned human-readable columns.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log filter directive for the verbosity count.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["spring-sim"]);
        assert!(cli.config.is_none());
        assert!(cli.commands.is_empty());
        assert!(cli.format.is_none());
        assert!(!cli.until_settled);
        assert!(!cli.inspect);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_repeated_commands_keep_order() {
        let cli = Cli::parse_from([
            "spring-sim",
            "-c",
            "SetStiffness 0.3",
            "--command",
            "SpringFromTo 0 10",
        ]);
        assert_eq!(cli.commands, ["SetStiffness 0.3", "SpringFromTo 0 10"]);
    }

    #[test]
    fn test_cli_tuning_flags() {
        let cli = Cli::parse_from([
            "spring-sim",
            "--stiffness",
            "0.5",
            "--damping",
            "-1",
            "--dt",
            "0.01",
            "-n",
            "30",
            "--format",
            "json",
        ]);
        assert_eq!(cli.stiffness, Some(0.5));
        assert_eq!(cli.damping, Some(-1.0));
        assert_eq!(cli.dt, Some(0.01));
        assert_eq!(cli.frames, Some(30));
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Cli::parse_from(["spring-sim"]).log_level(), "warn");
        assert_eq!(Cli::parse_from(["spring-sim", "-v"]).log_level(), "info");
        assert_eq!(Cli::parse_from(["spring-sim", "-vv"]).log_level(), "debug");
        assert_eq!(Cli::parse_from(["spring-sim", "-vvvv"]).log_level(), "trace");
    }
}
