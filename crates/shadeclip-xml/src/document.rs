//! In-memory model of an interchange document.

use std::collections::HashSet;
use std::fmt;

use crate::{Error, Result};

/// A complete interchange document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Name of the wrapping group, usually the first copied root.
    pub group: String,
    /// Renderer whose table produced the document.
    pub renderer: String,
    /// Version of that table.
    pub table_version: u32,
    /// Nodes in emission order.
    pub nodes: Vec<DocNode>,
    /// Nodes that could not be translated.
    pub placeholders: Vec<Placeholder>,
    /// Connections between node ids.
    pub connections: Vec<DocConnection>,
}

impl Document {
    /// Create an empty document.
    pub fn new(group: impl Into<String>, renderer: impl Into<String>, table_version: u32) -> Self {
        Self {
            group: group.into(),
            renderer: renderer.into(),
            table_version,
            ..Self::default()
        }
    }

    /// Find a node by id.
    pub fn node(&self, id: &str) -> Option<&DocNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Connections feeding the given node id.
    pub fn connections_into<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a DocConnection> + 'a {
        self.connections.iter().filter(move |c| c.target == id)
    }

    /// Check referential closure.
    ///
    /// Every node id must be unique, and both ends of every connection must
    /// name a node in the document.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(Error::DuplicateId(node.id.clone()));
            }
        }

        for connection in &self.connections {
            for id in [&connection.source, &connection.target] {
                if !ids.contains(id.as_str()) {
                    return Err(Error::DanglingReference {
                        connection: connection.to_string(),
                        id: id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// One translated node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocNode {
    /// Stable id, unique within the document.
    pub id: String,
    /// Source node name.
    pub name: String,
    /// Destination node type.
    pub node_type: String,
    /// Destination shading node class.
    pub class: String,
    /// Position in the destination editor.
    pub position: Option<[f64; 2]>,
    /// Node colour hint.
    pub color: Option<[f64; 3]>,
    /// Parameters in emission order.
    pub parameters: Vec<Parameter>,
}

impl DocNode {
    /// Find a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

/// A named parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Destination parameter name.
    pub name: String,
    /// Formatted value.
    pub value: ParamValue,
}

impl Parameter {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A parameter value with every number already formatted.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Float scalar.
    Float(String),
    /// Integer scalar; booleans are written as 0 or 1.
    Int(String),
    /// Enum label.
    Enum(String),
    /// String or path.
    String(String),
    /// RGB channels.
    Color3([String; 3]),
    /// Vector components.
    Vector3([String; 3]),
    /// Ramp knots in source order.
    Ramp(Vec<Knot>),
    /// Float sequence.
    FloatArray(Vec<String>),
}

impl ParamValue {
    /// The `kind` attribute written for this value.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Float(_) => "float",
            ParamValue::Int(_) => "int",
            ParamValue::Enum(_) => "enum",
            ParamValue::String(_) => "string",
            ParamValue::Color3(_) => "color3",
            ParamValue::Vector3(_) => "vector3",
            ParamValue::Ramp(_) => "ramp",
            ParamValue::FloatArray(_) => "floatArray",
        }
    }

    /// The scalar text, for kinds written as a single `value` attribute.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Float(s) | ParamValue::Int(s) | ParamValue::Enum(s) | ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Channel texts for colours, vectors and float arrays.
    pub fn channels(&self) -> Option<&[String]> {
        match self {
            ParamValue::Color3(c) | ParamValue::Vector3(c) => Some(c),
            ParamValue::FloatArray(v) => Some(v),
            _ => None,
        }
    }
}

/// One ramp knot.
#[derive(Debug, Clone, PartialEq)]
pub struct Knot {
    /// Formatted position.
    pub position: String,
    /// One channel for scalar ramps, three for colour ramps.
    pub channels: Vec<String>,
}

/// Marker for a node that could not be translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Source node name.
    pub name: String,
    /// Source node type.
    pub node_type: String,
}

impl Placeholder {
    /// Comment text written for the placeholder.
    pub fn comment(&self) -> String {
        // "--" is not allowed inside an XML comment.
        format!(" unsupported node '{}' of type '{}' ", self.name, self.node_type).replace("--", "- -")
    }

    /// Recover a placeholder from comment text.
    pub fn from_comment(text: &str) -> Option<Self> {
        let rest = text.trim().strip_prefix("unsupported node '")?;
        let (name, node_type) = rest.strip_suffix('\'')?.rsplit_once("' of type '")?;
        Some(Self {
            name: name.to_string(),
            node_type: node_type.to_string(),
        })
    }
}

/// A connection between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocConnection {
    /// Source node id.
    pub source: String,
    /// Source output port.
    pub output: String,
    /// Target node id.
    pub target: String,
    /// Target input parameter.
    pub input: String,
}

impl fmt::Display for DocConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} -> {}.{}", self.source, self.output, self.target, self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::new("SG1", "arnold", 1);
        doc.nodes.push(DocNode {
            id: "SG1".into(),
            name: "SG1".into(),
            node_type: "networkMaterial".into(),
            ..DocNode::default()
        });
        doc.nodes.push(DocNode {
            id: "std1".into(),
            name: "std1".into(),
            node_type: "standard".into(),
            ..DocNode::default()
        });
        doc.connections.push(DocConnection {
            source: "std1".into(),
            output: "out".into(),
            target: "SG1".into(),
            input: "arnoldSurface".into(),
        });
        doc
    }

    #[test]
    fn test_validate_ok() {
        let doc = doc();
        assert!(doc.validate().is_ok());
        assert_eq!(doc.connections_into("SG1").count(), 1);
        assert!(doc.node("std1").is_some());
    }

    #[test]
    fn test_validate_dangling() {
        let mut doc = doc();
        doc.connections[0].source = "ghost".into();
        assert!(matches!(
            doc.validate(),
            Err(Error::DanglingReference { id, .. }) if id == "ghost"
        ));
    }

    #[test]
    fn test_validate_duplicate_id() {
        let mut doc = doc();
        doc.nodes[1].id = "SG1".into();
        assert!(matches!(doc.validate(), Err(Error::DuplicateId(id)) if id == "SG1"));
    }

    #[test]
    fn test_placeholder_comment() {
        let placeholder = Placeholder {
            name: "cam1".into(),
            node_type: "camera".into(),
        };
        let comment = placeholder.comment();
        assert_eq!(comment, " unsupported node 'cam1' of type 'camera' ");
        assert_eq!(Placeholder::from_comment(&comment), Some(placeholder));
        assert_eq!(Placeholder::from_comment(" something else "), None);
    }
}
