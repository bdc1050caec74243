//! Shading nodes and the connections between them.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Value;

/// A shading node as exposed by the source scene.
///
/// Attributes keep the host's enumeration order, which keeps every output
/// derived from a node deterministic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShadingNode {
    /// Unique name in the source graph.
    pub name: String,
    /// Source node type tag.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub node_type: String,
    /// Attribute values in host order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: IndexMap<String, Value>,
    /// Incoming connections in host order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub connections: Vec<Incoming>,
    /// Position in the source node editor, if the host tracks one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub position: Option<[f64; 2]>,
}

impl ShadingNode {
    /// Create a node with no attributes or connections.
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            attributes: IndexMap::new(),
            connections: Vec::new(),
            position: None,
        }
    }

    /// Add an attribute value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add an incoming connection `node.output -> self.input`.
    pub fn input(
        mut self,
        input: impl Into<String>,
        node: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.connections.push(Incoming {
            input: input.into(),
            node: node.into(),
            output: output.into(),
        });
        self
    }

    /// Set the editor position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some([x, y]);
        self
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Whether an input attribute is driven by a connection.
    pub fn is_connected(&self, input: &str) -> bool {
        self.connections.iter().any(|c| c.input == input)
    }
}

/// An incoming connection on a node, seen from its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Incoming {
    /// Destination attribute on the owning node.
    pub input: String,
    /// Source node name.
    pub node: String,
    /// Source output attribute.
    pub output: String,
}

/// A directed edge `(source, output) -> (target, input)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Source node name.
    pub source: String,
    /// Source output attribute.
    pub output: String,
    /// Destination node name.
    pub target: String,
    /// Destination input attribute.
    pub input: String,
}

impl Connection {
    /// Build the edge for an incoming connection of `target`.
    pub fn from_incoming(target: &str, incoming: &Incoming) -> Self {
        Self {
            source: incoming.node.clone(),
            output: incoming.output.clone(),
            target: target.to_string(),
            input: incoming.input.clone(),
        }
    }

    /// Check if this connection involves a specific node.
    pub fn involves_node(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let node = ShadingNode::new("std1", "aiStandard")
            .attr("Kd", 0.8)
            .attr("color", [0.2, 0.4, 0.6])
            .attr("opacity", [1.0, 1.0, 1.0])
            .input("color", "file1", "outColor");

        let names: Vec<_> = node.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, ["Kd", "color", "opacity"]);
        assert!(node.is_connected("color"));
        assert!(!node.is_connected("Kd"));
    }

    #[test]
    fn test_connection_from_incoming() {
        let node = ShadingNode::new("std1", "aiStandard").input("color", "file1", "outColor");
        let edge = Connection::from_incoming(&node.name, &node.connections[0]);
        assert_eq!(edge.source, "file1");
        assert_eq!(edge.target, "std1");
        assert!(edge.involves_node("file1"));
        assert!(!edge.involves_node("file2"));
    }
}
