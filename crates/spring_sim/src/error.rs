//! Errors raised while preparing a simulation run.

use std::path::PathBuf;

use simple_spring::SpringError;
use thiserror::Error;

/// Failure loading configuration, scripts or snapshots.
#[derive(Debug, Error)]
pub enum SimError {
    /// A file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML config did not parse.
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A script line names an unknown action or is malformed.
    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: SpringError,
    },

    /// A `--command` argument names an unknown action.
    #[error("command {command:?}: {source}")]
    Command {
        command: String,
        #[source]
        source: SpringError,
    },

    /// A `tick` line has a count that is not a whole number.
    #[error("line {line}: bad tick count {count:?}")]
    TickCount { line: usize, count: String },

    /// The frame delta cannot advance a simulation.
    #[error("frame delta must be a positive number, got {0}")]
    FrameDelta(f64),

    /// A snapshot file was rejected.
    #[error("invalid snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: SpringError,
    },
}

impl SimError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized `Result` type for simulator setup.
pub type Result<T> = std::result::Result<T, SimError>;
