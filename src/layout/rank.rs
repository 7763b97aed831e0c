//! Rank assignment (longest path)
//!
//! Kahn-style iterative pass: peel off nodes with no remaining incoming
//! edges, giving each successor `max(rank(pred) + 1)`. Sources and
//! isolated nodes land in rank 0. Cyclic input cannot be ranked properly;
//! the leftover nodes are parked one rank past the acyclic part, in input
//! order, so the caller still gets a complete, deterministic mapping
//! instead of a crash. The parked arrangement itself is unspecified.

use std::collections::{HashMap, VecDeque};

use crate::graph::Graph;

/// Compute a rank per node such that rank(target) > rank(source) for
/// every edge of an acyclic graph.
pub(super) fn assign(graph: &Graph) -> HashMap<&str, usize> {
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();

    for node in graph.nodes() {
        in_degree.entry(node.id.as_str()).or_insert(0);
        outgoing.entry(node.id.as_str()).or_default();
    }
    for edge in graph.edges() {
        *in_degree.entry(edge.target.as_str()).or_insert(0) += 1;
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut ranks: HashMap<&str, usize> = HashMap::with_capacity(graph.node_count());
    let mut queue: VecDeque<&str> = VecDeque::new();

    // seed with sources in input order for deterministic output
    for node in graph.nodes() {
        let id = node.id.as_str();
        if in_degree[id] == 0 {
            ranks.insert(id, 0);
            queue.push_back(id);
        }
    }

    while let Some(current) = queue.pop_front() {
        let rank = ranks[current];
        if let Some(successors) = outgoing.get(current) {
            for &next in successors {
                let entry = ranks.entry(next).or_insert(0);
                if *entry < rank + 1 {
                    *entry = rank + 1;
                }
                let degree = in_degree.get_mut(next).expect("edge endpoints are known");
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    // cycle residue: nodes never released by the peel
    let parked = ranks.values().copied().max().map_or(0, |r| r + 1);
    for node in graph.nodes() {
        let id = node.id.as_str();
        if !ranks.contains_key(id) || in_degree[id] > 0 {
            ranks.insert(id, parked);
        }
    }

    ranks
}
