//! Named actions, conditions and expressions.
//!
//! Event-sheet style hosts address a behavior by name with string
//! arguments. This module maps those names onto [`SpringBehavior`] calls.
//! Arguments are parse-or-default: a missing or non-numeric argument takes
//! the value the editor would pre-fill.
//!
//! # Example
//!
//! ```rust
//! use simple_spring::{Action, Expression, SpringBehavior};
//!
//! let mut spring = SpringBehavior::default();
//! let action: Action = "SpringFromTo 0 50".parse().unwrap();
//! action.apply(&mut spring);
//!
//! assert_eq!(Expression::To.evaluate(&spring), 50.0);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::behavior::SpringBehavior;
use crate::config::{DEFAULT_DAMPING, DEFAULT_STIFFNESS, parse_number_or};
use crate::error::{Result, SpringError};

/// A command a host can send to a spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Spring from one value to another, inheriting velocity if running.
    SpringFromTo {
        /// Start value.
        from: f64,
        /// Target value.
        to: f64,
    },
    /// Spring an angle in degrees along the shortest rotation.
    SpringFromToAngle {
        /// Start angle.
        from: f64,
        /// Target angle.
        to: f64,
    },
    /// Set stiffness (clamped).
    SetStiffness(f64),
    /// Set damping (clamped).
    SetDamping(f64),
    /// Stop on the target.
    Stop,
    /// Stop where the spring currently is.
    StopInPlace,
    /// Jump to the target.
    SnapToTarget,
    /// Replace the velocity.
    SetVelocity(f64),
    /// Add to the velocity.
    AddToVelocity(f64),
}

impl Action {
    /// Every action name, in editor order.
    pub const NAMES: [&'static str; 9] = [
        "SpringFromTo",
        "SpringFromToAngle",
        "SetStiffness",
        "SetDamping",
        "Stop",
        "StopInPlace",
        "SnapToTarget",
        "SetVelocity",
        "AddToVelocity",
    ];

    /// Builds an action from its name and raw arguments.
    ///
    /// Names match case-insensitively. Extra arguments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::UnknownAction`] for an unrecognized name.
    pub fn parse(name: &str, args: &[&str]) -> Result<Self> {
        let arg = |i: usize, default: f64| parse_number_or(args.get(i).copied(), default);
        let action = match canonical(name, &Self::NAMES) {
            Some("SpringFromTo") => Self::SpringFromTo {
                from: arg(0, 0.0),
                to: arg(1, 100.0),
            },
            Some("SpringFromToAngle") => Self::SpringFromToAngle {
                from: arg(0, 0.0),
                to: arg(1, 90.0),
            },
            Some("SetStiffness") => Self::SetStiffness(arg(0, DEFAULT_STIFFNESS)),
            Some("SetDamping") => Self::SetDamping(arg(0, DEFAULT_DAMPING)),
            Some("Stop") => Self::Stop,
            Some("StopInPlace") => Self::StopInPlace,
            Some("SnapToTarget") => Self::SnapToTarget,
            Some("SetVelocity") => Self::SetVelocity(arg(0, 0.0)),
            Some("AddToVelocity") => Self::AddToVelocity(arg(0, 0.0)),
            _ => return Err(SpringError::UnknownAction(name.to_string())),
        };
        Ok(action)
    }

    /// The action's canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SpringFromTo { .. } => "SpringFromTo",
            Self::SpringFromToAngle { .. } => "SpringFromToAngle",
            Self::SetStiffness(_) => "SetStiffness",
            Self::SetDamping(_) => "SetDamping",
            Self::Stop => "Stop",
            Self::StopInPlace => "StopInPlace",
            Self::SnapToTarget => "SnapToTarget",
            Self::SetVelocity(_) => "SetVelocity",
            Self::AddToVelocity(_) => "AddToVelocity",
        }
    }

    /// Runs the action against a spring.
    pub fn apply<H>(self, spring: &mut SpringBehavior<H>) {
        match self {
            Self::SpringFromTo { from, to } => spring.spring_from_to(from, to),
            Self::SpringFromToAngle { from, to } => spring.spring_from_to_angle(from, to),
            Self::SetStiffness(v) => spring.set_stiffness(v),
            Self::SetDamping(v) => spring.set_damping(v),
            Self::Stop => spring.stop(),
            Self::StopInPlace => spring.stop_in_place(),
            Self::SnapToTarget => spring.snap_to_target(),
            Self::SetVelocity(v) => spring.set_velocity(v),
            Self::AddToVelocity(v) => spring.add_to_velocity(v),
        }
    }
}

impl FromStr for Action {
    type Err = SpringError;

    /// Parses `"Name arg arg"`, whitespace separated.
    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        Self::parse(name, &args)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Self::SpringFromTo { from, to } | Self::SpringFromToAngle { from, to } => {
                write!(f, " {from} {to}")
            }
            Self::SetStiffness(v) | Self::SetDamping(v) | Self::SetVelocity(v) | Self::AddToVelocity(v) => {
                write!(f, " {v}")
            }
            Self::Stop | Self::StopInPlace | Self::SnapToTarget => Ok(()),
        }
    }
}

/// A yes/no question about a spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The spring is moving.
    IsAnimating,
    /// The spring is at rest on its target.
    HasReachedTarget,
    /// Trigger that fires when the spring settles.
    OnReachedTarget,
}

impl Condition {
    /// Every condition name.
    pub const NAMES: [&'static str; 3] = ["IsAnimating", "HasReachedTarget", "OnReachedTarget"];

    /// Looks a condition up by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::UnknownCondition`] for an unrecognized name.
    pub fn from_name(name: &str) -> Result<Self> {
        match canonical(name, &Self::NAMES) {
            Some("IsAnimating") => Ok(Self::IsAnimating),
            Some("HasReachedTarget") => Ok(Self::HasReachedTarget),
            Some("OnReachedTarget") => Ok(Self::OnReachedTarget),
            _ => Err(SpringError::UnknownCondition(name.to_string())),
        }
    }

    /// Whether this is an event trigger rather than a polled check.
    pub fn is_trigger(self) -> bool {
        matches!(self, Self::OnReachedTarget)
    }

    /// Whether the host may negate this condition.
    pub fn is_invertible(self) -> bool {
        !self.is_trigger()
    }

    /// Evaluates the condition. Triggers are true whenever they are asked.
    pub fn evaluate<H>(self, spring: &SpringBehavior<H>) -> bool {
        match self {
            Self::IsAnimating => spring.is_animating(),
            Self::HasReachedTarget => spring.has_reached_target(),
            Self::OnReachedTarget => true,
        }
    }

    /// Evaluates, negating when `inverted` and the condition allows it.
    pub fn check<H>(self, spring: &SpringBehavior<H>, inverted: bool) -> bool {
        let result = self.evaluate(spring);
        if inverted && self.is_invertible() {
            !result
        } else {
            result
        }
    }
}

impl FromStr for Condition {
    type Err = SpringError;

    fn from_str(name: &str) -> Result<Self> {
        Self::from_name(name.trim())
    }
}

/// A number read from a spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression {
    /// Smoothed current value.
    Value,
    /// Start of the animation.
    From,
    /// Target of the animation.
    To,
    /// Velocity per physics step.
    Velocity,
    /// Stiffness gain.
    Stiffness,
    /// Damping gain.
    Damping,
}

impl Expression {
    /// Every expression name.
    pub const NAMES: [&'static str; 6] = ["Value", "From", "To", "Velocity", "Stiffness", "Damping"];

    /// Looks an expression up by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`SpringError::UnknownExpression`] for an unrecognized name.
    pub fn from_name(name: &str) -> Result<Self> {
        match canonical(name, &Self::NAMES) {
            Some("Value") => Ok(Self::Value),
            Some("From") => Ok(Self::From),
            Some("To") => Ok(Self::To),
            Some("Velocity") => Ok(Self::Velocity),
            Some("Stiffness") => Ok(Self::Stiffness),
            Some("Damping") => Ok(Self::Damping),
            _ => Err(SpringError::UnknownExpression(name.to_string())),
        }
    }

    /// Reads the number from a spring.
    pub fn evaluate<H>(self, spring: &SpringBehavior<H>) -> f64 {
        match self {
            Self::Value => spring.value(),
            Self::From => spring.from(),
            Self::To => spring.to(),
            Self::Velocity => spring.velocity(),
            Self::Stiffness => spring.stiffness(),
            Self::Damping => spring.damping(),
        }
    }
}

impl FromStr for Expression {
    type Err = SpringError;

    fn from_str(name: &str) -> Result<Self> {
        Self::from_name(name.trim())
    }
}

fn canonical(name: &str, names: &[&'static str]) -> Option<&'static str> {
    names.iter().copied().find(|n| n.eq_ignore_ascii_case(name))
}
