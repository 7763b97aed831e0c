//! Graph validation
//!
//! Full pass over a snapshot on every call: minimum size, structural
//! preconditions, cycle detection, connectivity. No state is kept between
//! calls; graphs here are small and human-edited, so correctness beats
//! incremental cleverness.
//!
//! The connectivity check is deliberately weak: it only requires that no
//! node is completely edge-less. Two disjoint edge-bearing components
//! still validate. Do not upgrade this to single-component connectivity;
//! it would change observable behavior.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::errors::GraphError;
use crate::graph::Graph;

/// Why a graph failed validation. Closed set; the display strings are a
/// stable vocabulary the UI layer may match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    TooFewNodes,
    CycleDetected,
    IsolatedNode,
}

impl InvalidReason {
    pub fn message(&self) -> &'static str {
        match self {
            InvalidReason::TooFewNodes => "At least two nodes required.",
            InvalidReason::CycleDetected => "Cycle detected in DAG.",
            InvalidReason::IsolatedNode => "All nodes must be connected.",
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Validation outcome. `Invalid` is a normal, recoverable result surfaced
/// to the user, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(InvalidReason),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Human-readable status line
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Valid => "Valid DAG",
            Verdict::Invalid(reason) => reason.message(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Validate a graph snapshot. Checks run in order and the first failure
/// wins:
///
/// 1. fewer than 2 nodes → `Invalid(TooFewNodes)`, regardless of edges
/// 2. structural preconditions → `Err(GraphError)` (loud, distinct from
///    a verdict; unreachable through the editor API)
/// 3. directed cycle → `Invalid(CycleDetected)`
/// 4. edge-less node → `Invalid(IsolatedNode)`
pub fn validate(graph: &Graph) -> Result<Verdict, GraphError> {
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "validating graph snapshot"
    );

    if graph.node_count() < 2 {
        return Ok(Verdict::Invalid(InvalidReason::TooFewNodes));
    }

    graph.check_invariants()?;

    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in graph.nodes() {
        outgoing.entry(node.id.as_str()).or_default();
    }
    for edge in graph.edges() {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    if has_cycle(graph, &outgoing) {
        return Ok(Verdict::Invalid(InvalidReason::CycleDetected));
    }

    let mut incident: HashSet<&str> = HashSet::new();
    for edge in graph.edges() {
        incident.insert(edge.source.as_str());
        incident.insert(edge.target.as_str());
    }
    for node in graph.nodes() {
        if !incident.contains(node.id.as_str()) {
            debug!(id = %node.id, "isolated node");
            return Ok(Verdict::Invalid(InvalidReason::IsolatedNode));
        }
    }

    Ok(Verdict::Valid)
}

/// Iterative depth-first cycle detection.
///
/// Explicit frame stack instead of recursion so deep chains cannot blow
/// the call stack. Two sets: `on_path` tracks the active traversal path,
/// `visited` tracks fully explored nodes. Reaching an `on_path` node is a
/// cycle; reaching a merely `visited` node is a reconverging path
/// (diamond), which is fine. Traversal restarts from every unvisited node
/// so disconnected components are covered.
fn has_cycle(graph: &Graph, outgoing: &HashMap<&str, Vec<&str>>) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_path: HashSet<&str> = HashSet::new();
    // (node, index of the next child to explore)
    let mut stack: Vec<(&str, usize)> = Vec::new();

    for node in graph.nodes() {
        let root = node.id.as_str();
        if visited.contains(root) {
            continue;
        }

        visited.insert(root);
        on_path.insert(root);
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let current = frame.0;
            let children = outgoing.get(current).map(|v| v.as_slice()).unwrap_or(&[]);

            if frame.1 < children.len() {
                let child = children[frame.1];
                frame.1 += 1;

                if on_path.contains(child) {
                    return true;
                }
                if visited.insert(child) {
                    on_path.insert(child);
                    stack.push((child, 0));
                }
            } else {
                on_path.remove(current);
                stack.pop();
            }
        }
    }

    false
}
