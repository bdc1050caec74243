//! Mapping table record types.
//!
//! Everything here is `const`-constructible so renderer tables can live in
//! `static` arrays. A table is pure data: the engine interprets it.

use shadeclip_common::Value;

/// Tolerance used when comparing floats against declared defaults.
pub const FLOAT_TOLERANCE: f64 = 0.001;

/// The value kind an attribute is declared with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    /// Float scalar.
    Float,
    /// Integer scalar.
    Int,
    /// Boolean, written as an integer.
    Bool,
    /// Source holds an index, destination expects a label.
    EnumLabel(&'static [&'static str]),
    /// Source holds a label, destination expects an index.
    EnumIndex(&'static [&'static str]),
    /// RGB colour.
    Color,
    /// Three-component vector.
    Vector,
    /// Free-form string.
    String,
    /// File path.
    Path,
    /// Ramp knots.
    Ramp,
    /// Array of floats.
    FloatArray,
    /// Connection-only input; values on it are never written.
    Port,
}

impl ValueKind {
    /// Classify a runtime value that no policy declares.
    ///
    /// `Vec3` is taken to be a colour. Returns `None` for opaque host values.
    pub fn infer(value: &Value) -> Option<ValueKind> {
        match value {
            Value::Float(_) => Some(ValueKind::Float),
            Value::Int(_) => Some(ValueKind::Int),
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::String(_) => Some(ValueKind::String),
            Value::Vec3(_) => Some(ValueKind::Color),
            Value::Ramp(_) => Some(ValueKind::Ramp),
            Value::FloatArray(_) => Some(ValueKind::FloatArray),
            Value::Opaque { .. } => None,
        }
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Float => "float",
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::EnumLabel(_) | ValueKind::EnumIndex(_) => "enum",
            ValueKind::Color => "color",
            ValueKind::Vector => "vector",
            ValueKind::String => "string",
            ValueKind::Path => "path",
            ValueKind::Ramp => "ramp",
            ValueKind::FloatArray => "floatArray",
            ValueKind::Port => "port",
        }
    }
}

/// A value transformation applied before default comparison and formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Keep the value as is.
    None,
    /// Swap the file extension and normalise separators to `/`.
    TexturePath(&'static str),
    /// Collapse a colour to the minimum of its channels.
    ReduceMin,
    /// Collapse a colour to the maximum of its channels.
    ReduceMax,
    /// Replace the value with a constant.
    Override(StaticValue),
    /// Replace matching string values.
    Remap(&'static [(&'static str, &'static str)]),
}

/// A value that can be stored in a `static` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaticValue {
    /// Float.
    Float(f64),
    /// Integer.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// String.
    Str(&'static str),
    /// Colour or vector.
    Vec3([f64; 3]),
}

impl StaticValue {
    /// Convert to a runtime value.
    pub fn to_value(self) -> Value {
        match self {
            StaticValue::Float(v) => Value::Float(v),
            StaticValue::Int(v) => Value::Int(v),
            StaticValue::Bool(v) => Value::Bool(v),
            StaticValue::Str(s) => Value::String(s.to_string()),
            StaticValue::Vec3(v) => Value::Vec3(v),
        }
    }

    /// Compare against a runtime value.
    ///
    /// Floats match within [`FLOAT_TOLERANCE`], booleans match the integers
    /// 0 and 1, and integers match integral floats.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (StaticValue::Str(a), Value::String(b)) => *a == b,
            (StaticValue::Vec3(a), Value::Vec3(b)) => a
                .iter()
                .zip(b.iter())
                .all(|(x, y)| (x - y).abs() < FLOAT_TOLERANCE),
            (StaticValue::Bool(a), other) => match other.as_i64() {
                Some(v) => (v != 0) == *a,
                None => false,
            },
            (StaticValue::Int(a), Value::Int(b)) => a == b,
            (StaticValue::Int(a), Value::Bool(b)) => *a == *b as i64,
            (StaticValue::Int(a), Value::Float(b)) => (*a as f64 - b).abs() < FLOAT_TOLERANCE,
            (StaticValue::Float(a), other) => match other.as_f64() {
                Some(b) => (a - b).abs() < FLOAT_TOLERANCE,
                None => false,
            },
            _ => false,
        }
    }

    /// Whether the value is numerically zero.
    pub fn is_zero(&self) -> bool {
        match self {
            StaticValue::Float(v) => *v == 0.0,
            StaticValue::Int(v) => *v == 0,
            StaticValue::Bool(v) => !*v,
            StaticValue::Vec3(v) => v.iter().all(|c| *c == 0.0),
            StaticValue::Str(_) => false,
        }
    }
}

/// How one source attribute maps to the destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributePolicy {
    /// Source attribute name.
    pub source: &'static str,
    /// Destination attribute name, when it differs.
    pub rename: Option<&'static str>,
    /// Declared value kind.
    pub kind: ValueKind,
    /// Value transformation.
    pub transform: Transform,
    /// Declared default value.
    pub default: Option<StaticValue>,
    /// Omit the attribute when it equals the default.
    pub skip_if_default: bool,
    /// Source attribute that switches this one off when zero.
    pub gate: Option<&'static str>,
}

impl AttributePolicy {
    /// A policy with no default and no rename.
    pub const fn new(source: &'static str, kind: ValueKind) -> Self {
        Self {
            source,
            rename: None,
            kind,
            transform: Transform::None,
            default: None,
            skip_if_default: true,
            gate: None,
        }
    }

    const fn with_default(source: &'static str, kind: ValueKind, default: StaticValue) -> Self {
        Self {
            default: Some(default),
            ..Self::new(source, kind)
        }
    }

    /// Float attribute.
    pub const fn float(source: &'static str, default: f64) -> Self {
        Self::with_default(source, ValueKind::Float, StaticValue::Float(default))
    }

    /// Integer attribute.
    pub const fn int(source: &'static str, default: i64) -> Self {
        Self::with_default(source, ValueKind::Int, StaticValue::Int(default))
    }

    /// Boolean attribute.
    pub const fn boolean(source: &'static str, default: bool) -> Self {
        Self::with_default(source, ValueKind::Bool, StaticValue::Bool(default))
    }

    /// Colour attribute.
    pub const fn color(source: &'static str, default: [f64; 3]) -> Self {
        Self::with_default(source, ValueKind::Color, StaticValue::Vec3(default))
    }

    /// Vector attribute.
    pub const fn vector(source: &'static str, default: [f64; 3]) -> Self {
        Self::with_default(source, ValueKind::Vector, StaticValue::Vec3(default))
    }

    /// String attribute.
    pub const fn string(source: &'static str, default: &'static str) -> Self {
        Self::with_default(source, ValueKind::String, StaticValue::Str(default))
    }

    /// File path attribute; empty by default.
    pub const fn path(source: &'static str) -> Self {
        Self::with_default(source, ValueKind::Path, StaticValue::Str(""))
    }

    /// Enum attribute stored as an index and written as a label.
    pub const fn enumeration(source: &'static str, labels: &'static [&'static str], default: i64) -> Self {
        Self::with_default(source, ValueKind::EnumLabel(labels), StaticValue::Int(default))
    }

    /// Enum attribute stored as a label and written as an index.
    pub const fn label_enum(source: &'static str, labels: &'static [&'static str], default: &'static str) -> Self {
        Self::with_default(source, ValueKind::EnumIndex(labels), StaticValue::Str(default))
    }

    /// Ramp attribute; always written.
    pub const fn ramp(source: &'static str) -> Self {
        Self::new(source, ValueKind::Ramp)
    }

    /// Connection-only input.
    pub const fn port(source: &'static str) -> Self {
        Self::new(source, ValueKind::Port)
    }

    /// Rename on the destination side.
    pub const fn to(self, dest: &'static str) -> Self {
        Self {
            rename: Some(dest),
            ..self
        }
    }

    /// Apply a transformation.
    pub const fn transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    /// Switch off when `parent` is zero.
    pub const fn gated(self, parent: &'static str) -> Self {
        Self {
            gate: Some(parent),
            ..self
        }
    }

    /// Write the value even when it equals the default.
    pub const fn always(self) -> Self {
        Self {
            skip_if_default: false,
            ..self
        }
    }

    /// Destination attribute name.
    pub fn dest_name(&self) -> &'static str {
        self.rename.unwrap_or(self.source)
    }
}

/// What to do with source attributes a table does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlisted {
    /// Pass them through and report a diagnostic.
    Warn,
    /// Pass them through silently.
    Pass,
    /// Leave them out and report each at info level.
    Drop,
}

/// A rewrite of the source network applied before translation.
///
/// Some source constructs have no one-to-one counterpart: a ramp whose knots
/// are driven by textures, an indexed array input, a sampler output. An
/// expansion replaces them with extra nodes and connections expressed in
/// the source vocabulary, so the same table then translates the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expansion {
    /// No rewrite.
    None,
    /// Indexed connections `input[i]` are gathered by an array connector
    /// node of type `connector` feeding `input`. A single indexed connection
    /// is moved onto `input` directly.
    ArrayConnector {
        input: &'static str,
        connector: &'static str,
    },
    /// Connected knots of the ramp attribute `knots` become a chain of
    /// `blendColors` nodes, each blended by a ramp of type `float_ramp`
    /// holding 0/1 knot values.
    MixRamp {
        knots: &'static str,
        float_ramp: &'static str,
    },
    /// Knots of the ramp attribute `knots` feed `input` through an array
    /// connector. Unconnected knots get a `fill` node whose `fill_input`
    /// holds the knot colour and whose `fill_output` feeds the connector.
    ConnectorRamp {
        knots: &'static str,
        input: &'static str,
        connector: &'static str,
        fill: &'static str,
        fill_input: &'static str,
        fill_output: &'static str,
    },
    /// Outputs of a sampler node are replaced by utility nodes:
    /// `facingRatio` by `facing_ratio`, `flippedNormal` by `flipped_normal`
    /// with a white front and a black back.
    Sampler {
        facing_ratio: &'static str,
        flipped_normal: &'static str,
    },
    /// A bump node whose `bumpInterp` is tangent-space normal becomes a
    /// node of type `transform` converting tangent normals to world space.
    NormalBump { transform: &'static str },
    /// Only connections into `input` are kept.
    SingleInput(&'static str),
    /// A shading group that takes over the name of its surface shader, the
    /// shader being renamed `<name>_out`.
    Material(&'static MaterialRule),
}

/// How a shading group finds and adopts its surface shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialRule {
    /// Surface inputs in priority order.
    pub surface: &'static [&'static str],
    /// `(node type, input)` pairs passed through to reach the real shader.
    pub passthrough: &'static [(&'static str, &'static str)],
    /// Shader input moved onto the group, with the group input it lands on.
    pub bump: Option<(&'static str, &'static str)>,
}

/// The mapping for one source node type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingEntry {
    /// Source node type.
    pub source_type: &'static str,
    /// Destination node type.
    pub dest_type: &'static str,
    /// Destination shading node class.
    pub class: &'static str,
    /// Node colour hint in the destination editor.
    pub color: Option<[f64; 3]>,
    /// Handling of attributes missing from `attributes`.
    pub unlisted: Unlisted,
    /// Attribute policies.
    pub attributes: &'static [AttributePolicy],
    /// Network rewrite applied before translation.
    pub expansion: Expansion,
    /// Sort key among siblings in the tree layout; heavier subtrees go right.
    pub weight: i32,
}

impl MappingEntry {
    /// An entry with no attribute policies.
    pub const fn new(source_type: &'static str, dest_type: &'static str, class: &'static str) -> Self {
        Self {
            source_type,
            dest_type,
            class,
            color: None,
            unlisted: Unlisted::Warn,
            attributes: &[],
            expansion: Expansion::None,
            weight: 0,
        }
    }

    /// Identity mapping: same type name, attributes passed through.
    pub const fn identity(source_type: &'static str, class: &'static str) -> Self {
        Self {
            unlisted: Unlisted::Pass,
            ..Self::new(source_type, source_type, class)
        }
    }

    /// Set the attribute policies.
    pub const fn attributes(self, attributes: &'static [AttributePolicy]) -> Self {
        Self { attributes, ..self }
    }

    /// Set the node colour hint.
    pub const fn color(self, color: [f64; 3]) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    /// Set the unlisted-attribute handling.
    pub const fn unlisted(self, unlisted: Unlisted) -> Self {
        Self { unlisted, ..self }
    }

    /// Set the network rewrite.
    pub const fn expand(self, expansion: Expansion) -> Self {
        Self { expansion, ..self }
    }

    /// Set the layout weight.
    pub const fn weight(self, weight: i32) -> Self {
        Self { weight, ..self }
    }

    /// Look up the policy for a source attribute.
    pub fn policy(&self, source: &str) -> Option<&AttributePolicy> {
        self.attributes.iter().find(|p| p.source == source)
    }

    /// Destination input name for a source input.
    pub fn dest_input<'a>(&self, source: &'a str) -> &'a str {
        self.policy(source).map_or(source, |p| p.dest_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_value_matches() {
        assert!(StaticValue::Float(0.5).matches(&Value::Float(0.5004)));
        assert!(!StaticValue::Float(0.5).matches(&Value::Float(0.502)));
        assert!(StaticValue::Float(1.0).matches(&Value::Int(1)));
        assert!(StaticValue::Bool(true).matches(&Value::Int(1)));
        assert!(StaticValue::Bool(false).matches(&Value::Bool(false)));
        assert!(StaticValue::Int(2).matches(&Value::Float(2.0)));
        assert!(StaticValue::Vec3([1.0, 1.0, 1.0]).matches(&Value::Vec3([1.0, 0.9999, 1.0])));
        assert!(!StaticValue::Vec3([1.0, 1.0, 1.0]).matches(&Value::Float(1.0)));
        assert!(StaticValue::Str("").matches(&Value::from("")));
        assert!(!StaticValue::Str("a").matches(&Value::Int(0)));
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(ValueKind::infer(&Value::Float(1.0)), Some(ValueKind::Float));
        assert_eq!(ValueKind::infer(&Value::Vec3([0.0; 3])), Some(ValueKind::Color));
        assert_eq!(ValueKind::infer(&Value::from("a")), Some(ValueKind::String));
        assert_eq!(
            ValueKind::infer(&Value::Opaque {
                kind: "matrix".into(),
                text: "1 0 0 1".into(),
            }),
            None
        );
    }

    #[test]
    fn test_policy_builders() {
        const POLICY: AttributePolicy = AttributePolicy::color("color", [1.0, 1.0, 1.0])
            .to("Kd_color")
            .gated("Kd");

        assert_eq!(POLICY.dest_name(), "Kd_color");
        assert_eq!(POLICY.gate, Some("Kd"));
        assert!(POLICY.skip_if_default);
        assert!(!POLICY.always().skip_if_default);
        assert_eq!(AttributePolicy::float("Kd", 0.7).dest_name(), "Kd");
    }

    #[test]
    fn test_entry_dest_input() {
        static POLICIES: [AttributePolicy; 1] = [AttributePolicy::port("surfaceShader").to("arnoldSurface")];
        let entry = MappingEntry::new("shadingEngine", "networkMaterial", "NetworkMaterial").attributes(&POLICIES);

        assert_eq!(entry.dest_input("surfaceShader"), "arnoldSurface");
        assert_eq!(entry.dest_input("other"), "other");
        assert_eq!(entry.expansion, Expansion::None);
        assert_eq!(entry.weight(20).weight, 20);
    }
}
