//! Runtime configuration for `spring-sim`.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! command-line flags. A config file looks like:
//!
//! ```toml
//! dt = 0.008333
//! frames = 240
//! format = "json"
//! until_settled = true
//!
//! [spring]
//! stiffness = 0.2
//! damping = 0.7
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use simple_spring::SpringConfig;

use crate::cli::{Cli, OutputFormat};
use crate::error::{Result, SimError};

/// Frame delta used when nothing else is given.
pub const DEFAULT_DT: f64 = 1.0 / 60.0;
/// Frames run when no `tick` step is given.
pub const DEFAULT_FRAMES: usize = 120;

/// Fully resolved simulation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Gains handed to the spring.
    pub spring: SpringConfig,
    /// Seconds between simulated frames.
    pub dt: f64,
    /// Frames run when no `tick` step is given.
    pub frames: usize,
    /// How frames are printed.
    pub format: OutputFormat,
    /// Cut each tick run short once the spring is idle.
    pub until_settled: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            dt: DEFAULT_DT,
            frames: DEFAULT_FRAMES,
            format: OutputFormat::Text,
            until_settled: false,
        }
    }
}

/// Shape of the TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    dt: Option<f64>,
    frames: Option<usize>,
    format: Option<OutputFormat>,
    until_settled: Option<bool>,
    spring: Option<SpringConfig>,
}

impl SimConfig {
    /// Resolve settings from CLI arguments, reading `--config` if given.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the resulting frame delta is not a positive number.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(stiffness) = cli.stiffness {
            config.spring.stiffness = stiffness;
        }
        if let Some(damping) = cli.damping {
            config.spring.damping = damping;
        }
        if let Some(precision) = cli.precision {
            config.spring.precision = precision;
        }
        if let Some(dt) = cli.dt {
            config.dt = dt;
        }
        if let Some(frames) = cli.frames {
            config.frames = frames;
        }
        if let Some(format) = cli.format {
            config.format = format;
        }
        config.until_settled |= cli.until_settled;

        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        Self::from_toml(&text).map_err(|source| SimError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(text)?;
        let defaults = Self::default();
        Ok(Self {
            spring: file.spring.unwrap_or(defaults.spring),
            dt: file.dt.unwrap_or(defaults.dt),
            frames: file.frames.unwrap_or(defaults.frames),
            format: file.format.unwrap_or(defaults.format),
            until_settled: file.until_settled.unwrap_or(defaults.until_settled),
        })
    }

    fn validate(&self) -> Result<()> {
        if self.dt.is_finite() && self.dt > 0.0 {
            Ok(())
        } else {
            Err(SimError::FrameDelta(self.dt))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("spring-sim").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = SimConfig::from_cli(&cli(&[])).unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.spring.stiffness, 0.15);
    }

    #[test]
    fn test_partial_spring_table_keeps_other_defaults() {
        let config = SimConfig::from_toml("frames = 10\n[spring]\ndamping = 0.5\n").unwrap();
        assert_eq!(config.frames, 10);
        assert_eq!(config.spring.damping, 0.5);
        assert_eq!(config.spring.stiffness, 0.15);
        assert_eq!(config.dt, DEFAULT_DT);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(SimConfig::from_toml("mass = 3\n").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "dt = 0.02\nformat = \"json\"\n[spring]\nstiffness = 0.2").unwrap();
        let path = file.path().to_str().unwrap();

        let config = SimConfig::from_cli(&cli(&["--config", path, "--stiffness", "0.9"])).unwrap();
        assert_eq!(config.spring.stiffness, 0.9);
        assert_eq!(config.dt, 0.02);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimConfig::from_file(Path::new("/nonexistent/spring.toml")).unwrap_err();
        assert!(matches!(err, SimError::Io { .. }));
    }

    #[test]
    fn test_non_positive_dt_rejected() {
        let err = SimConfig::from_cli(&cli(&["--dt", "0"])).unwrap_err();
        assert!(matches!(err, SimError::FrameDelta(_)));
    }
}
