//! Construction-time configuration for a spring behavior.
//!
//! A host hands the behavior three ordered property values: stiffness,
//! damping and precision. Each one is parsed on its own and falls back to
//! its default when absent or not a number.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use simple_spring::SpringConfig;
//!
//! let config = SpringConfig::from_properties(&[json!(0.3), json!("0.9")]);
//! assert_eq!(config.stiffness, 0.3);
//! assert_eq!(config.damping, 0.9);
//! assert_eq!(config.precision, 0.01); // missing slot
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stiffness used when the host supplies nothing usable.
pub const DEFAULT_STIFFNESS: f64 = 0.15;
/// Damping used when the host supplies nothing usable.
pub const DEFAULT_DAMPING: f64 = 0.8;
/// Settle threshold used when the host supplies nothing usable.
pub const DEFAULT_PRECISION: f64 = 0.01;

/// Lowest stiffness a spring will accept.
pub const MIN_STIFFNESS: f64 = 0.01;
/// Highest stiffness a spring will accept.
pub const MAX_STIFFNESS: f64 = 1.0;
/// Lowest damping a spring will accept.
pub const MIN_DAMPING: f64 = 0.0;
/// Highest damping a spring will accept.
pub const MAX_DAMPING: f64 = 1.0;

/// Spring gains and settle threshold.
///
/// Values deserialized from a file keep whatever the file says; they are
/// sanitized when a behavior is built from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Fraction of the displacement added to velocity each step.
    pub stiffness: f64,
    /// Factor velocity is multiplied by each step.
    pub damping: f64,
    /// Displacement and speed below which the spring counts as settled.
    pub precision: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SpringConfig {
    /// Creates a config with the default gains.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from the host's ordered property list.
    ///
    /// Slot 0 is stiffness, slot 1 damping, slot 2 precision. Extra slots
    /// are ignored.
    pub fn from_properties(properties: &[Value]) -> Self {
        let slot = |i: usize, default: f64| {
            properties.get(i).and_then(parse_number).unwrap_or(default)
        };
        Self {
            stiffness: slot(0, DEFAULT_STIFFNESS),
            damping: slot(1, DEFAULT_DAMPING),
            precision: slot(2, DEFAULT_PRECISION),
        }
    }

    /// Sets the stiffness.
    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Sets the damping.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the precision.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Returns a copy with every field forced into its legal range.
    pub fn sanitized(self) -> Self {
        Self {
            stiffness: clamp_stiffness(self.stiffness),
            damping: clamp_damping(self.damping),
            precision: sanitize_precision(self.precision),
        }
    }
}

/// Parses a loosely typed host value as a finite number.
///
/// Numbers and numeric strings are accepted. Booleans, null, arrays and
/// objects are not coerced.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Parses a textual argument as a finite number, or returns `default`.
pub fn parse_number_or(text: Option<&str>, default: f64) -> f64 {
    text.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(default)
}

/// Clamps stiffness into `[0.01, 1]`. NaN becomes the default.
pub fn clamp_stiffness(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_STIFFNESS
    } else {
        value.clamp(MIN_STIFFNESS, MAX_STIFFNESS)
    }
}

/// Clamps damping into `[0, 1]`. NaN becomes the default.
pub fn clamp_damping(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_DAMPING
    } else {
        value.clamp(MIN_DAMPING, MAX_DAMPING)
    }
}

/// Precision must be positive and finite.
pub fn sanitize_precision(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        DEFAULT_PRECISION
    }
}

/// Editor metadata for one host-configurable property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDef {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line help text.
    pub description: &'static str,
    /// Value a freshly placed behavior starts with in the editor.
    pub initial: f64,
    /// Smallest value the editor allows.
    pub min: f64,
    /// Largest value the editor allows, if bounded.
    pub max: Option<f64>,
}

/// The three construction properties, in slot order.
pub const PROPERTIES: [PropertyDef; 3] = [
    PropertyDef {
        id: "stiffness",
        name: "Stiffness",
        description: "How quickly the spring responds. Increase for a faster response.",
        initial: 1.25,
        min: 0.0,
        max: None,
    },
    PropertyDef {
        id: "damping",
        name: "Damping",
        description: "How much oscillation is dampened (0-1). Increase to reduce overshoot.",
        initial: 0.9,
        min: 0.0,
        max: Some(1.0),
    },
    PropertyDef {
        id: "precision",
        name: "Precision",
        description: "Threshold to consider the animation complete. Lower values require closer proximity.",
        initial: 0.01,
        min: 0.0001,
        max: Some(1.0),
    },
];
