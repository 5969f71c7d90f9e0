//! Save and restore a spring.
//!
//! A [`SpringSnapshot`] is a flat record of the durable fields. The
//! interpolation caches (`prev_value`, `smooth_value`) and the accumulator
//! are not stored; loading rebuilds them from `value`.
//!
//! # Example
//!
//! ```rust
//! use simple_spring::{SpringBehavior, SpringSnapshot};
//!
//! let mut spring = SpringBehavior::default();
//! spring.spring_from_to(0.0, 10.0);
//! spring.tick(0.05);
//!
//! let json = spring.save().to_json().unwrap();
//! let mut restored = SpringBehavior::default();
//! restored.load(&SpringSnapshot::from_json(&json).unwrap());
//!
//! assert_eq!(restored.save(), spring.save());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::behavior::SpringBehavior;
use crate::config::{
    DEFAULT_DAMPING, DEFAULT_PRECISION, DEFAULT_STIFFNESS, clamp_damping, clamp_stiffness,
    parse_number, sanitize_precision,
};
use crate::error::{Result, SpringError};

/// The persisted form of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpringSnapshot {
    /// Start of the animation.
    pub from: f64,
    /// Target of the animation.
    pub to: f64,
    /// Physics position.
    pub value: f64,
    /// Velocity per physics step.
    pub velocity: f64,
    /// Stiffness gain.
    pub stiffness: f64,
    /// Damping gain.
    pub damping: f64,
    /// Settle threshold.
    pub precision: f64,
    /// Whether the spring was running.
    pub is_animating: bool,
}

impl Default for SpringSnapshot {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            value: 0.0,
            velocity: 0.0,
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            precision: DEFAULT_PRECISION,
            is_animating: false,
        }
    }
}

impl SpringSnapshot {
    /// Reads a snapshot from loosely typed JSON.
    ///
    /// Each field is taken on its own. A missing field, or one that is not a
    /// finite number (or not a boolean, for `isAnimating`), gets its default.
    /// Numeric strings are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::SnapshotNotObject`] when `value` is not an
    /// object.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(SpringError::SnapshotNotObject(json_kind(value)));
        };
        let defaults = Self::default();
        let number = |key: &str, default: f64| map.get(key).and_then(parse_number).unwrap_or(default);

        Ok(Self {
            from: number("from", defaults.from),
            to: number("to", defaults.to),
            value: number("value", defaults.value),
            velocity: number("velocity", defaults.velocity),
            stiffness: number("stiffness", defaults.stiffness),
            damping: number("damping", defaults.damping),
            precision: number("precision", defaults.precision),
            is_animating: map
                .get("isAnimating")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.is_animating),
        })
    }

    /// Parses snapshot JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::MalformedSnapshot`] for invalid JSON and
    /// [`SpringError::SnapshotNotObject`] for a non-object document.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(SpringError::malformed)?;
        Self::from_json_value(&value)
    }

    /// Encodes the snapshot as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::MalformedSnapshot`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(SpringError::malformed)
    }

    /// Encodes the snapshot as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::MalformedSnapshot`] if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(SpringError::malformed)
    }
}

impl<H> SpringBehavior<H> {
    /// Captures the durable state.
    pub fn save(&self) -> SpringSnapshot {
        let state = &self.state;
        SpringSnapshot {
            from: state.from,
            to: state.to,
            value: state.value,
            velocity: state.velocity,
            stiffness: state.stiffness,
            damping: state.damping,
            precision: state.precision,
            is_animating: state.is_animating,
        }
    }

    /// Restores a previously saved state.
    ///
    /// Gains are clamped and a bad precision falls back to its default.
    /// Non-finite positions and velocity fall back to zero. The render
    /// caches are rebuilt from `value` and the accumulator starts empty.
    pub fn load(&mut self, snapshot: &SpringSnapshot) {
        let state = &mut self.state;
        state.from = finite_or_zero(snapshot.from);
        state.to = finite_or_zero(snapshot.to);
        state.velocity = finite_or_zero(snapshot.velocity);
        state.stiffness = clamp_stiffness(snapshot.stiffness);
        state.damping = clamp_damping(snapshot.damping);
        state.precision = sanitize_precision(snapshot.precision);
        state.is_animating = snapshot.is_animating;

        let value = finite_or_zero(snapshot.value);
        state.value = value;
        state.prev_value = value;
        state.smooth_value = value;
        state.time = 0.0;
        state.steps = 0;

        debug!(value, to = state.to, animating = state.is_animating, "spring restored");
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
