//! Rendering records as text or JSON lines.

use std::io::{self, Write};

use serde_json::{Map, Value};
use simple_spring::{DEBUG_SECTION, DebugProperty, DebugValue};

use crate::cli::OutputFormat;
use crate::sim::Record;

/// Writes every record in the chosen format.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_records<W: Write>(out: &mut W, format: OutputFormat, records: &[Record]) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(
                out,
                "{:>6}  {:>9}  {:>14}  {:>12}  state",
                "frame", "time", "value", "velocity"
            )?;
            for record in records {
                write_text(out, record)?;
            }
        }
        OutputFormat::Json => {
            for record in records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()
}

/// Writes the debugger view of a spring under its section heading.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_inspection<W: Write>(
    out: &mut W,
    format: OutputFormat,
    properties: &[DebugProperty],
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "[{DEBUG_SECTION}]")?;
            for property in properties {
                let access = if property.editable { "" } else { " (read-only)" };
                writeln!(out, "{} = {}{access}", property.name, property.value)?;
            }
        }
        OutputFormat::Json => {
            let fields: Map<String, Value> = properties
                .iter()
                .map(|p| {
                    let value = match p.value {
                        DebugValue::Bool(b) => Value::Bool(b),
                        DebugValue::Number(n) => Value::from(n),
                    };
                    (p.name.to_string(), value)
                })
                .collect();
            let record = serde_json::json!({
                "event": "inspect",
                "section": DEBUG_SECTION,
                "properties": fields,
            });
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }
    }
    out.flush()
}

fn write_text<W: Write>(out: &mut W, record: &Record) -> io::Result<()> {
    match record {
        Record::Action { frame, action } => writeln!(out, "# before frame {}: {action}", frame + 1),
        Record::Frame {
            frame,
            time,
            value,
            velocity,
            animating,
        } => writeln!(
            out,
            "{frame:>6}  {time:>9.4}  {value:>14.6}  {velocity:>12.6}  {}",
            if *animating { "moving" } else { "idle" }
        ),
        Record::Reached { frame, value } => {
            writeln!(out, "* reached target {value} at frame {frame}")
        }
        Record::Diverged { frame } => {
            writeln!(out, "! diverged at frame {frame}, snapped to target")
        }
    }
}
