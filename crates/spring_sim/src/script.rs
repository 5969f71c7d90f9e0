//! Script parsing.
//!
//! A script is plain text with one step per line. A step is either an
//! action in the form `Name arg arg` or `tick [frames]`. Blank lines and
//! anything after `#` are ignored.
//!
//! ```text
//! # throw the spring and let it ring for a second
//! SetDamping 0.9
//! SpringFromTo 0 100
//! tick 60
//! AddToVelocity -20
//! tick 120
//! ```

use std::fmt;

use simple_spring::Action;

use crate::error::{Result, SimError};

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Apply an action to the spring.
    Action(Action),
    /// Advance the simulated host by this many frames.
    Tick(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => write!(f, "{action}"),
            Self::Tick(frames) => write!(f, "tick {frames}"),
        }
    }
}

/// Parses a whole script.
///
/// # Errors
///
/// Returns the first malformed line, numbered from 1.
pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(step) = parse_line(line, index + 1)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Parses a single `--command` argument.
///
/// # Errors
///
/// Returns [`SimError::Command`] for an unknown action and
/// [`SimError::TickCount`] for a bad frame count.
pub fn parse_command(command: &str) -> Result<Option<Step>> {
    parse_line(command, 0).map_err(|err| match err {
        SimError::Script { source, .. } => SimError::Command {
            command: command.to_string(),
            source,
        },
        other => other,
    })
}

fn parse_line(line: &str, number: usize) -> Result<Option<Step>> {
    let code = line.split_once('#').map_or(line, |(code, _)| code).trim();
    if code.is_empty() {
        return Ok(None);
    }

    let mut words = code.split_whitespace();
    let first = words.next().unwrap_or_default();
    if first.eq_ignore_ascii_case("tick") {
        let frames = match words.next() {
            None => 1,
            Some(count) => count.parse().map_err(|_| SimError::TickCount {
                line: number,
                count: count.to_string(),
            })?,
        };
        return Ok(Some(Step::Tick(frames)));
    }

    code.parse::<Action>()
        .map(|action| Some(Step::Action(action)))
        .map_err(|source| SimError::Script {
            line: number,
            source,
        })
}
