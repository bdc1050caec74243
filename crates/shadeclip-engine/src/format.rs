//! Value formatting.
//!
//! Turns a runtime [`Value`] into the textual form the destination expects
//! for a declared [`ValueKind`]. Numbers are written with the renderer's fixed
//! precision so that repeated copies are byte-identical.

use shadeclip_common::{KnotValue, Value};
use shadeclip_tables::ValueKind;
use shadeclip_xml::{Knot, ParamValue};
use thiserror::Error;

/// A formatted parameter value.
pub type FormattedValue = ParamValue;

/// Formatting failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The value cannot be expressed as the declared kind.
    #[error("cannot format {value} value as {kind}")]
    UnsupportedValueKind { value: String, kind: &'static str },
}

impl FormatError {
    fn new(value: &Value, kind: ValueKind) -> Self {
        FormatError::UnsupportedValueKind {
            value: value.type_name().to_string(),
            kind: kind.name(),
        }
    }
}

/// Format a number with fixed precision.
///
/// Negative zero, including values that round to it, is written as zero.
pub fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

fn triple(v: [f64; 3], precision: usize) -> [String; 3] {
    v.map(|c| format_number(c, precision))
}

/// Format a value as the given kind.
pub fn format(value: &Value, kind: ValueKind, precision: usize) -> Result<FormattedValue, FormatError> {
    let unsupported = || FormatError::new(value, kind);

    let formatted = match kind {
        ValueKind::Float => {
            let v = value.as_f64().ok_or_else(unsupported)?;
            ParamValue::Float(format_number(v, precision))
        }
        ValueKind::Int => {
            let v = value.as_i64().ok_or_else(unsupported)?;
            ParamValue::Int(v.to_string())
        }
        ValueKind::Bool => {
            let v = value.as_i64().ok_or_else(unsupported)?;
            ParamValue::Int(if v != 0 { "1" } else { "0" }.to_string())
        }
        ValueKind::EnumLabel(labels) => {
            let label = match value {
                Value::String(s) => labels.iter().copied().find(|l| *l == s.as_str()),
                other => other
                    .as_i64()
                    .and_then(|i| usize::try_from(i).ok())
                    .and_then(|i| labels.get(i).copied()),
            }
            .ok_or_else(unsupported)?;
            ParamValue::Enum(label.to_string())
        }
        ValueKind::EnumIndex(labels) => {
            let index = match value {
                Value::String(s) => labels.iter().position(|l| *l == s.as_str()).ok_or_else(unsupported)?,
                other => other
                    .as_i64()
                    .and_then(|i| usize::try_from(i).ok())
                    .filter(|i| *i < labels.len())
                    .ok_or_else(unsupported)?,
            };
            ParamValue::Int(index.to_string())
        }
        ValueKind::Color => ParamValue::Color3(triple(value.as_vec3().ok_or_else(unsupported)?, precision)),
        ValueKind::Vector => ParamValue::Vector3(triple(value.as_vec3().ok_or_else(unsupported)?, precision)),
        ValueKind::String | ValueKind::Path => ParamValue::String(value.as_str().ok_or_else(unsupported)?.to_string()),
        ValueKind::Ramp => match value {
            Value::Ramp(knots) => ParamValue::Ramp(
                knots
                    .iter()
                    .map(|knot| Knot {
                        position: format_number(knot.position, precision),
                        channels: match knot.value {
                            KnotValue::Scalar(v) => vec![format_number(v, precision)],
                            KnotValue::Vec3(v) => triple(v, precision).to_vec(),
                        },
                    })
                    .collect(),
            ),
            _ => return Err(unsupported()),
        },
        ValueKind::FloatArray => match value {
            Value::FloatArray(values) => {
                ParamValue::FloatArray(values.iter().map(|v| format_number(*v, precision)).collect())
            }
            _ => return Err(unsupported()),
        },
        ValueKind::Port => return Err(unsupported()),
    };

    Ok(formatted)
}

/// Map a source output plug to a destination output port.
///
/// Single-channel outputs keep their channel; everything else is `out`.
pub fn output_port(source_output: &str) -> &'static str {
    match source_output {
        "outColorR" => "out.r",
        "outColorG" => "out.g",
        "outColorB" => "out.b",
        "outColorA" | "outAlpha" => "out.a",
        "outValueX" => "out.x",
        "outValueY" => "out.y",
        "outValueZ" => "out.z",
        _ => "out",
    }
}
