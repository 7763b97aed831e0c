//! Editor controller
//!
//! Owns the graph, the selection and the id generator, and sequences the
//! control flow of the editing loop: every structural mutation re-runs
//! validation so the surfaced verdict always matches the model. Layout is
//! computed on explicit request against the current snapshot and its
//! application is revision-guarded: a result computed before a later
//! structural edit is rejected instead of merged.
//!
//! Everything here is synchronous and single-threaded; the controller is
//! driven from a UI event loop and never blocks.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::{GraphError, LayoutError};
use crate::graph::{Edge, Graph, Node};
use crate::idgen::{IdGenerator, SequentialIds};
use crate::layout::{layout, Bounds, LayoutConfig, LayoutResult};
use crate::types::{NodeId, Point};
use crate::validate::{validate, Verdict};

/// Outcome of a connect request. Rejection is a no-op, not an error: the
/// model is untouched and the verdict unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(Edge),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    SelfLoop,
    DuplicateEdge,
    UnknownEndpoint,
}

/// The editing session state
pub struct Editor {
    graph: Graph,
    ids: Box<dyn IdGenerator>,
    selected_nodes: HashSet<NodeId>,
    selected_edges: HashSet<(NodeId, NodeId)>,
    verdict: Verdict,
    config: LayoutConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(SequentialIds::new()))
    }

    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        let graph = Graph::new();
        let verdict = validate(&graph).expect("empty graph is well formed");
        Self {
            graph,
            ids,
            selected_nodes: HashSet::new(),
            selected_edges: HashSet::new(),
            verdict,
            config: LayoutConfig::default(),
        }
    }

    /// Adopt an existing graph (e.g. a loaded document). The sequential
    /// generator is seeded past any `node_N` ids already present so fresh
    /// ids never collide.
    pub fn from_graph(graph: Graph) -> Result<Self, GraphError> {
        let verdict = validate(&graph)?;
        let next = graph
            .nodes()
            .iter()
            .filter_map(|n| n.id.strip_prefix("node_"))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .map(|n| n + 1)
            .max()
            .unwrap_or(0);
        Ok(Self {
            graph,
            ids: Box::new(SequentialIds::starting_at(next)),
            selected_nodes: HashSet::new(),
            selected_edges: HashSet::new(),
            verdict,
            config: LayoutConfig::default(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Verdict for the current snapshot, recomputed after every mutation
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_layout_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    /// Create a node with a fresh id at a deterministic scatter position
    pub fn add_node(&mut self, label: impl Into<String>) -> Result<Node, GraphError> {
        let id = self.ids.next_id();
        let mut node = Node::new(id, label);
        node.position = scatter(self.graph.node_count());
        self.graph.add_node(node.clone())?;
        self.revalidate();
        debug!(id = %node.id, "node added");
        Ok(node)
    }

    /// Connect two nodes. Self-loops, duplicate pairs and unknown
    /// endpoints are rejected as no-ops.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> ConnectOutcome {
        match self.graph.add_edge(source.clone(), target.clone()) {
            Ok(edge) => {
                self.revalidate();
                debug!(source = %edge.source, target = %edge.target, "edge added");
                ConnectOutcome::Connected(edge)
            }
            Err(GraphError::SelfLoop { .. }) => ConnectOutcome::Rejected(RejectReason::SelfLoop),
            Err(GraphError::DuplicateEdge { .. }) => {
                ConnectOutcome::Rejected(RejectReason::DuplicateEdge)
            }
            Err(_) => ConnectOutcome::Rejected(RejectReason::UnknownEndpoint),
        }
    }

    pub fn select_node(&mut self, id: &NodeId) {
        if self.graph.contains_node(id) {
            self.selected_nodes.insert(id.clone());
        }
    }

    pub fn select_edge(&mut self, source: &NodeId, target: &NodeId) {
        if self.graph.has_edge(source, target) {
            self.selected_edges.insert((source.clone(), target.clone()));
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_nodes.clear();
        self.selected_edges.clear();
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.selected_nodes.iter()
    }

    /// Delete everything selected. Edges referencing a deleted node are
    /// cascade-deleted by the model, so no dangling edge can survive.
    pub fn delete_selected(&mut self) {
        let mut removed = 0usize;
        for (source, target) in std::mem::take(&mut self.selected_edges) {
            if self.graph.remove_edge(&source, &target) {
                removed += 1;
            }
        }
        for id in std::mem::take(&mut self.selected_nodes) {
            if self.graph.remove_node(&id) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.revalidate();
        }
        debug!(removed, "selection deleted");
    }

    /// Compute a layout for the current snapshot
    pub fn request_layout(&self) -> Result<LayoutResult, LayoutError> {
        layout(&self.graph, &self.config)
    }

    /// Fold a layout result back into the model and return the new
    /// bounding box for the view refit. Results computed before a later
    /// structural edit are stale and rejected; positions are untouched.
    pub fn apply_layout(&mut self, result: &LayoutResult) -> Result<Bounds, LayoutError> {
        if result.revision != self.graph.revision() {
            return Err(LayoutError::StaleLayout {
                computed_at: result.revision,
                current: self.graph.revision(),
            });
        }
        for (id, position) in &result.positions {
            self.graph.set_position(id, *position)?;
        }
        Ok(result.bounds)
    }

    fn revalidate(&mut self) {
        // the editor's own checks keep snapshots well formed; a
        // structural error here is a bug in this module
        self.verdict = validate(&self.graph).expect("editor produced a malformed snapshot");
    }
}

/// Deterministic scatter for freshly created nodes, in lieu of the
/// canvas drop position the UI would normally provide
fn scatter(index: usize) -> Point {
    let column = (index % 5) as f64;
    let row = (index / 5) as f64;
    Point::new(column * 50.0, row * 50.0)
}
