//! Graph model: nodes and directed edges
//!
//! The single source of truth mutated by the editor. Edges are identified
//! by their (source, target) pair; each node exposes exactly one outgoing
//! and one incoming port, so the pair fully identifies a connection. The
//! model rejects self-loops, duplicate pairs and dangling endpoints at
//! mutation time, and cascade-deletes edges when a node is removed, so
//! snapshots handed to the validator and layout engine are structurally
//! sound by construction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::GraphError;
use crate::types::{NodeId, Point};

/// A node on the canvas
///
/// Position is layout-owned; the logical node size is fixed system-wide
/// and lives in [`crate::layout::LayoutConfig`], not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    #[serde(default)]
    pub position: Point,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            position: Point::ZERO,
        }
    }
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

/// Node set plus edge set, with a revision counter bumped on every
/// structural change. Position updates are not structural and do not
/// bump the revision, so an in-flight layout stays applicable across
/// its own write-back.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    revision: u64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from untrusted parts (e.g. a parsed document),
    /// checking every structural invariant.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge.source, edge.target)?;
        }
        graph.revision = 0;
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.get_node(id).is_some()
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source.as_str() == source && e.target.as_str() == target)
    }

    /// Structural revision, bumped on node/edge add and remove
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Insert a node. Rejects duplicate ids.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateNode {
                id: node.id.to_string(),
            });
        }
        self.nodes.push(node);
        self.revision += 1;
        Ok(())
    }

    /// Connect source to target. Rejects self-loops, duplicate pairs and
    /// unknown endpoints; on success returns the inserted edge.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<Edge, GraphError> {
        if source == target {
            return Err(GraphError::SelfLoop {
                id: source.to_string(),
            });
        }
        for endpoint in [&source, &target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::DanglingEdge {
                    src: source.to_string(),
                    target: target.to_string(),
                    missing: endpoint.to_string(),
                });
            }
        }
        if self.has_edge(&source, &target) {
            return Err(GraphError::DuplicateEdge {
                src: source.to_string(),
                target: target.to_string(),
            });
        }

        let edge = Edge { source, target };
        self.edges.push(edge.clone());
        self.revision += 1;
        Ok(edge)
    }

    /// Remove a node and cascade-delete every edge referencing it, so the
    /// dangling-edge invariant is never violated. Returns false if the id
    /// was unknown.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id.as_str() != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges
            .retain(|e| e.source.as_str() != id && e.target.as_str() != id);
        self.revision += 1;
        true
    }

    /// Remove a single edge by its pair. Returns false if absent.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        let before = self.edges.len();
        self.edges
            .retain(|e| !(e.source.as_str() == source && e.target.as_str() == target));
        if self.edges.len() == before {
            return false;
        }
        self.revision += 1;
        true
    }

    /// Overwrite a node's position. Not a structural change.
    pub fn set_position(&mut self, id: &str, position: Point) -> Result<(), GraphError> {
        match self.nodes.iter_mut().find(|n| n.id.as_str() == id) {
            Some(node) => {
                node.position = position;
                Ok(())
            }
            None => Err(GraphError::UnknownNode { id: id.to_string() }),
        }
    }

    /// Re-check every structural invariant on the current snapshot.
    ///
    /// Unreachable through this model's own API; guards snapshots built
    /// by other means and keeps the validator and layout engine honest.
    pub fn check_invariants(&self) -> Result<(), GraphError> {
        let mut ids: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNode {
                    id: node.id.to_string(),
                });
            }
        }

        let mut pairs: HashSet<(&str, &str)> = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if edge.source == edge.target {
                return Err(GraphError::SelfLoop {
                    id: edge.source.to_string(),
                });
            }
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(GraphError::DanglingEdge {
                        src: edge.source.to_string(),
                        target: edge.target.to_string(),
                        missing: endpoint.to_string(),
                    });
                }
            }
            if !pairs.insert((edge.source.as_str(), edge.target.as_str())) {
                return Err(GraphError::DuplicateEdge {
                    src: edge.source.to_string(),
                    target: edge.target.to_string(),
                });
            }
        }

        Ok(())
    }
}
