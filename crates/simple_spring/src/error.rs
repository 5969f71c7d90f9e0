//! Error types for the host-binding boundary.
//!
//! The simulation itself never fails: bad numbers are clamped or replaced
//! by defaults, and divergence is recovered in place. Errors only surface
//! where text crosses into the crate, i.e. snapshot JSON, action names,
//! and debugger property names.

use thiserror::Error;

/// Errors raised while decoding host input.
///
/// # Note on Clone and PartialEq
///
/// Like the rest of the crate's value types, this error implements `Clone`
/// and `PartialEq` so tests can compare it directly. The JSON variant keeps
/// the parser's message as a `String` for that reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpringError {
    /// The snapshot text was not valid JSON.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// The snapshot parsed, but its top level was not an object.
    #[error("snapshot must be a JSON object, found {0}")]
    SnapshotNotObject(&'static str),

    /// No action with this name exists.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// No condition with this name exists.
    #[error("unknown condition: {0}")]
    UnknownCondition(String),

    /// No expression with this name exists.
    #[error("unknown expression: {0}")]
    UnknownExpression(String),

    /// The debugger has no editable property with this name.
    #[error("no editable debugger property named {0}")]
    UnknownProperty(String),
}

impl SpringError {
    /// Creates a malformed-snapshot error from any displayable cause.
    pub fn malformed(cause: impl std::fmt::Display) -> Self {
        Self::MalformedSnapshot(cause.to_string())
    }

    /// Returns true if this error came from decoding a snapshot.
    pub fn is_snapshot_error(&self) -> bool {
        matches!(self, Self::MalformedSnapshot(_) | Self::SnapshotNotObject(_))
    }
}

/// A specialized [`Result`] type for simple_spring boundary operations.
pub type Result<T> = std::result::Result<T, SpringError>;
