//! Graph walker for discovering the upstream network of a node.
//!
//! The walker starts at a root (usually a shading group) and follows incoming
//! connections depth-first, collecting every node that feeds the root exactly
//! once. Nodes are returned in pre-order discovery order, root first.

use std::borrow::Cow;
use std::ops::Range;

use shadeclip_common::{Connection, SceneGraph, ShadingNode};

use crate::diagnostics::Diagnostic;
use crate::{Error, FxHashMap, FxHashSet, Result};

/// A node reached by the walker.
///
/// Nodes borrowed from the scene stay borrowed until an expansion has to
/// change or create one.
#[derive(Debug, Clone)]
pub struct Discovered<'s> {
    /// The source node.
    pub node: Cow<'s, ShadingNode>,
    /// Index of the node through which it was first reached.
    pub parent: Option<usize>,
    /// Distance from its root along first-discovery links.
    pub depth: usize,
    edges: Range<usize>,
}

impl<'s> Discovered<'s> {
    pub(crate) fn new(node: Cow<'s, ShadingNode>, parent: Option<usize>, depth: usize) -> Self {
        Self {
            node,
            parent,
            depth,
            edges: 0..0,
        }
    }
}

/// Result of a walk.
#[derive(Debug, Default)]
pub struct Discovery<'s> {
    /// Nodes in discovery order.
    pub nodes: Vec<Discovered<'s>>,
    /// Resolved connections, grouped by destination in discovery order.
    pub edges: Vec<Connection>,
    /// Problems found while walking.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'s> Discovery<'s> {
    /// Assemble a discovery from nodes in pre-order and edges in any order.
    ///
    /// Edges are grouped by destination in node order, keeping their
    /// relative order within a group. Edges into unknown nodes are dropped.
    pub(crate) fn from_parts(nodes: Vec<Discovered<'s>>, edges: Vec<Connection>, diagnostics: Vec<Diagnostic>) -> Self {
        let mut grouped: Vec<Vec<Connection>> = vec![Vec::new(); nodes.len()];
        {
            let index: FxHashMap<&str, usize> = nodes
                .iter()
                .enumerate()
                .map(|(i, d)| (d.node.name.as_str(), i))
                .collect();
            for edge in edges {
                if let Some(&i) = index.get(edge.target.as_str()) {
                    grouped[i].push(edge);
                }
            }
        }
        Self::assemble(nodes, grouped, diagnostics)
    }

    fn assemble(mut nodes: Vec<Discovered<'s>>, grouped: Vec<Vec<Connection>>, diagnostics: Vec<Diagnostic>) -> Self {
        let mut edges = Vec::with_capacity(grouped.iter().map(Vec::len).sum());
        for (discovered, group) in nodes.iter_mut().zip(grouped) {
            let start = edges.len();
            edges.extend(group);
            discovered.edges = start..edges.len();
        }

        Self {
            nodes,
            edges,
            diagnostics,
        }
    }

    /// Resolved connections into the node at `index`, in host order.
    pub fn incoming(&self, index: usize) -> &[Connection] {
        &self.edges[self.nodes[index].edges.clone()]
    }

    /// Index of a discovered node by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|d| d.node.name == name)
    }

    /// Discovered node names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|d| d.node.name.as_str())
    }
}

/// Walks a scene graph upstream from one or more roots.
pub struct GraphWalker<'s, S: SceneGraph + ?Sized> {
    scene: &'s S,
    visited: FxHashSet<&'s str>,
    on_stack: FxHashSet<&'s str>,
    nodes: Vec<Discovered<'s>>,
    incoming: FxHashMap<usize, Vec<Connection>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'s, S: SceneGraph + ?Sized> GraphWalker<'s, S> {
    fn new(scene: &'s S) -> Self {
        Self {
            scene,
            visited: FxHashSet::default(),
            on_stack: FxHashSet::default(),
            nodes: Vec::new(),
            incoming: FxHashMap::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Discover the network upstream of `root`.
    pub fn discover(scene: &'s S, root: &str) -> Result<Discovery<'s>> {
        Self::discover_many(scene, &[root])
    }

    /// Discover the union of the networks upstream of several roots.
    ///
    /// Nodes shared between roots appear once, under the first root that
    /// reaches them.
    pub fn discover_many<R: AsRef<str>>(scene: &'s S, roots: &[R]) -> Result<Discovery<'s>> {
        if roots.is_empty() {
            return Err(Error::NoRoots);
        }

        let mut walker = Self::new(scene);
        for root in roots {
            let root = root.as_ref();
            let node = scene
                .node(root)
                .ok_or_else(|| shadeclip_common::Error::NotFound(root.to_string()))?;
            if !walker.visited.contains(node.name.as_str()) {
                walker.walk_node(node, None, 0);
            }
        }

        Ok(walker.finish())
    }

    fn walk_node(&mut self, node: &'s ShadingNode, parent: Option<usize>, depth: usize) {
        let index = self.nodes.len();
        self.nodes.push(Discovered::new(Cow::Borrowed(node), parent, depth));
        self.visited.insert(node.name.as_str());
        self.on_stack.insert(node.name.as_str());

        let mut edges = Vec::with_capacity(node.connections.len());
        for incoming in &node.connections {
            let Some(source) = self.scene.node(&incoming.node) else {
                self.diagnostics.push(Diagnostic::DanglingConnection {
                    source: incoming.node.clone(),
                    output: incoming.output.clone(),
                    target: node.name.clone(),
                    input: incoming.input.clone(),
                });
                continue;
            };

            edges.push(Connection::from_incoming(&node.name, incoming));

            if self.on_stack.contains(source.name.as_str()) {
                self.diagnostics.push(Diagnostic::Topology {
                    source: source.name.clone(),
                    target: node.name.clone(),
                    input: incoming.input.clone(),
                });
            } else if !self.visited.contains(source.name.as_str()) {
                self.walk_node(source, Some(index), depth + 1);
            }
        }

        self.incoming.insert(index, edges);
        self.on_stack.remove(node.name.as_str());
    }

    fn finish(mut self) -> Discovery<'s> {
        let grouped = (0..self.nodes.len())
            .map(|index| self.incoming.remove(&index).unwrap_or_default())
            .collect();
        Discovery::assemble(self.nodes, grouped, self.diagnostics)
    }
}

/// Discover the network upstream of `root`.
pub fn discover<'s, S: SceneGraph + ?Sized>(scene: &'s S, root: &str) -> Result<Discovery<'s>> {
    GraphWalker::discover(scene, root)
}

/// Discover the union of the networks upstream of several roots.
pub fn discover_many<'s, S: SceneGraph + ?Sized, R: AsRef<str>>(scene: &'s S, roots: &[R]) -> Result<Discovery<'s>> {
    GraphWalker::discover_many(scene, roots)
}
