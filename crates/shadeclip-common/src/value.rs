//! Runtime attribute values read from the source scene.
//!
//! The host hands every attribute over as one of these variants. Values carry
//! no declared kind of their own: whether a `Vec3` is a colour or a vector, or
//! whether an `Int` is an enum index, is decided by the mapping table.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A runtime attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Value {
    /// Floating point scalar.
    Float(f64),
    /// Integer scalar, also used for enum indices.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// String or file path.
    String(String),
    /// Three-component colour or vector.
    Vec3([f64; 3]),
    /// Ramp knots in source order.
    Ramp(Vec<RampKnot>),
    /// Plain array of floats.
    FloatArray(Vec<f64>),
    /// A host value type with no model here (matrix, message, ...).
    Opaque {
        /// Host type name.
        kind: String,
        /// Host string rendering of the value.
        text: String,
    },
}

impl Value {
    /// Interpret the value as a float, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            Value::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Interpret the value as an integer, if it is integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Bool(v) => Some(*v as i64),
            Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Get the string payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the three components of a `Vec3`.
    pub fn as_vec3(&self) -> Option<[f64; 3]> {
        match self {
            Value::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether the value is numerically zero.
    ///
    /// Colours count as zero when every channel is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Vec3(v) => v.iter().all(|c| *c == 0.0),
            other => other.as_f64() == Some(0.0),
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Float(_) => "float",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Vec3(_) => "vec3",
            Value::Ramp(_) => "ramp",
            Value::FloatArray(_) => "floatArray",
            Value::Opaque { kind, .. } => kind,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Vec3([x, y, z]) => write!(f, "({}, {}, {})", x, y, z),
            Value::Ramp(knots) => write!(f, "[ramp; {} knots]", knots.len()),
            Value::FloatArray(values) => write!(f, "[{} floats]", values.len()),
            Value::Opaque { text, .. } => write!(f, "{}", text),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<[f64; 3]> for Value {
    fn from(v: [f64; 3]) -> Self {
        Value::Vec3(v)
    }
}

/// One knot of a ramp attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RampKnot {
    /// Knot position along the ramp.
    pub position: f64,
    /// Knot value.
    pub value: KnotValue,
}

impl RampKnot {
    /// Create a colour knot.
    pub fn color(position: f64, value: [f64; 3]) -> Self {
        Self { position, value: KnotValue::Vec3(value) }
    }

    /// Create a scalar knot.
    pub fn scalar(position: f64, value: f64) -> Self {
        Self { position, value: KnotValue::Scalar(value) }
    }
}

/// Value stored at a ramp knot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum KnotValue {
    /// Float ramp knot.
    Scalar(f64),
    /// Colour ramp knot.
    Vec3([f64; 3]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::Float(3.0).as_i64(), Some(3));
        assert_eq!(Value::Float(3.5).as_i64(), None);
        assert_eq!(Value::from("x").as_f64(), None);
    }

    #[test]
    fn test_is_zero() {
        assert!(Value::Float(0.0).is_zero());
        assert!(Value::Vec3([0.0; 3]).is_zero());
        assert!(!Value::Vec3([0.0, 0.1, 0.0]).is_zero());
        assert!(!Value::from("0").is_zero());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_shape() {
        let value: Value = serde_json::from_str(r#"{"vec3": [0.2, 0.4, 0.6]}"#).unwrap();
        assert_eq!(value, Value::Vec3([0.2, 0.4, 0.6]));

        let ramp: Value = serde_json::from_str(
            r#"{"ramp": [{"position": 0.0, "value": [1.0, 0.0, 0.0]}, {"position": 1.0, "value": 0.5}]}"#,
        )
        .unwrap();
        assert_eq!(
            ramp,
            Value::Ramp(vec![RampKnot::color(0.0, [1.0, 0.0, 0.0]), RampKnot::scalar(1.0, 0.5)])
        );
    }
}
