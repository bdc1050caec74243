//! The read-only scene interface and an in-memory implementation.
//!
//! The engine only ever needs to resolve a node by name and read it. Hosts
//! implement [`SceneGraph`] over their own scripting API; [`MemoryScene`]
//! backs tests and the command-line tool with a JSON snapshot.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{Error, Result, ShadingNode};

/// Read-only access to a source scene.
pub trait SceneGraph {
    /// Resolve a node by name.
    fn node(&self, name: &str) -> Option<&ShadingNode>;

    /// Names of network roots: nodes that feed no other node.
    fn roots(&self) -> Vec<&str>;
}

/// A scene held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    nodes: IndexMap<String, ShadingNode>,
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from nodes, rejecting duplicate names.
    pub fn from_nodes(nodes: impl IntoIterator<Item = ShadingNode>) -> Result<Self> {
        let mut scene = Self::new();
        for node in nodes {
            scene.insert(node)?;
        }
        Ok(scene)
    }

    /// Add a node.
    pub fn insert(&mut self, node: ShadingNode) -> Result<()> {
        if self.nodes.contains_key(&node.name) {
            return Err(Error::DuplicateNode(node.name));
        }
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ShadingNode> {
        self.nodes.values()
    }

    /// Parse a JSON snapshot of the form `{"nodes": [...]}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| Error::Scene(e.to_string()))?;
        Self::from_nodes(snapshot.nodes)
    }

    /// Read a JSON snapshot from disk.
    #[cfg(feature = "serde")]
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the scene back to a JSON snapshot.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        let snapshot = SnapshotRef {
            nodes: self.nodes.values().collect(),
        };
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Scene(e.to_string()))
    }
}

impl SceneGraph for MemoryScene {
    fn node(&self, name: &str) -> Option<&ShadingNode> {
        self.nodes.get(name)
    }

    fn roots(&self) -> Vec<&str> {
        let sources: HashSet<&str> = self
            .nodes
            .values()
            .flat_map(|n| n.connections.iter().map(|c| c.node.as_str()))
            .collect();

        self.nodes
            .keys()
            .map(String::as_str)
            .filter(|name| !sources.contains(name))
            .collect()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct Snapshot {
    nodes: Vec<ShadingNode>,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
struct SnapshotRef<'a> {
    nodes: Vec<&'a ShadingNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryScene {
        MemoryScene::from_nodes([
            ShadingNode::new("SG1", "shadingEngine").input("surfaceShader", "std1", "outColor"),
            ShadingNode::new("std1", "aiStandard").input("color", "file1", "outColor"),
            ShadingNode::new("file1", "aiImage"),
            ShadingNode::new("stray", "aiNoise"),
        ])
        .unwrap()
    }

    #[test]
    fn test_roots() {
        let scene = sample();
        assert_eq!(scene.roots(), ["SG1", "stray"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = MemoryScene::from_nodes([
            ShadingNode::new("a", "aiNoise"),
            ShadingNode::new("a", "aiImage"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateNode(name)) if name == "a"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let scene = sample();
        let json = scene.to_json().unwrap();
        let parsed = MemoryScene::from_json(&json).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed.node("std1"), scene.node("std1"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_invalid() {
        assert!(matches!(MemoryScene::from_json("{"), Err(Error::Scene(_))));
    }
}
