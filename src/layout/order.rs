//! Ordering within ranks (barycenter heuristic)
//!
//! Crossing reduction: alternating down/up sweeps reorder each rank by
//! the average position of a node's neighbors in the adjacent ranks. Not
//! globally optimal, but cheap and good enough for hand-built graphs.
//! Stable sort plus an input-order start makes the result deterministic.

use std::collections::HashMap;

use crate::graph::Graph;

/// Group nodes into rows by rank (input order within a row), then run
/// `sweeps` barycenter passes.
pub(super) fn arrange<'a>(
    graph: &'a Graph,
    ranks: &HashMap<&'a str, usize>,
    sweeps: usize,
) -> Vec<Vec<&'a str>> {
    let max_rank = ranks.values().copied().max().unwrap_or(0);
    let mut rows: Vec<Vec<&str>> = vec![Vec::new(); max_rank + 1];
    for node in graph.nodes() {
        rows[ranks[node.id.as_str()]].push(node.id.as_str());
    }

    let mut predecessors: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in graph.edges() {
        predecessors
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
        successors
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    // index of each node within its row, updated after every reorder
    let mut positions: HashMap<&str, f64> = HashMap::new();
    for row in &rows {
        for (idx, &id) in row.iter().enumerate() {
            positions.insert(id, idx as f64);
        }
    }

    for sweep in 0..sweeps {
        let downward = sweep % 2 == 0;
        let row_indices: Vec<usize> = if downward {
            (1..rows.len()).collect()
        } else {
            (0..rows.len().saturating_sub(1)).rev().collect()
        };

        for row_idx in row_indices {
            let neighbors = if downward { &predecessors } else { &successors };
            let mut keyed: Vec<(&str, f64)> = rows[row_idx]
                .iter()
                .map(|&id| (id, barycenter(id, neighbors, &positions)))
                .collect();
            keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

            rows[row_idx] = keyed.iter().map(|&(id, _)| id).collect();
            for (idx, &(id, _)) in keyed.iter().enumerate() {
                positions.insert(id, idx as f64);
            }
        }
    }

    rows
}

/// Average neighbor position; a node with no neighbors in the fixed rank
/// keeps its current slot.
fn barycenter(
    id: &str,
    neighbors: &HashMap<&str, Vec<&str>>,
    positions: &HashMap<&str, f64>,
) -> f64 {
    let adjacent: Vec<f64> = neighbors
        .get(id)
        .into_iter()
        .flatten()
        .filter_map(|n| positions.get(*n))
        .copied()
        .collect();

    if adjacent.is_empty() {
        positions.get(id).copied().unwrap_or(0.0)
    } else {
        adjacent.iter().sum::<f64>() / adjacent.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::layout::rank;
    use crate::types::NodeId;

    fn build(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for &n in nodes {
            g.add_node(Node::new(NodeId::new(n).unwrap(), n)).unwrap();
        }
        for &(s, t) in edges {
            g.add_edge(NodeId::new(s).unwrap(), NodeId::new(t).unwrap())
                .unwrap();
        }
        g
    }

    #[test]
    fn test_rows_cover_every_node() {
        let g = build(
            &["a", "b", "c", "d", "lone"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        let ranks = rank::assign(&g);
        let rows = arrange(&g, &ranks, 4);

        let total: usize = rows.iter().map(Vec::len).sum();
        assert_eq!(total, 5);
        assert!(rows[0].contains(&"a"));
        assert!(rows[0].contains(&"lone"));
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[2], vec!["d"]);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let g = build(
            &["a", "b", "c", "d", "e"],
            &[("a", "c"), ("b", "d"), ("a", "e"), ("b", "e")],
        );
        let ranks = rank::assign(&g);
        let first = arrange(&g, &ranks, 4);
        let second = arrange(&g, &ranks, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_barycenter_untangles_crossing() {
        // a → y and b → x cross when rank 1 keeps input order [x, y];
        // one downward sweep swaps them under their parents
        let g = build(&["a", "b", "x", "y"], &[("a", "y"), ("b", "x")]);
        let ranks = rank::assign(&g);
        let rows = arrange(&g, &ranks, 2);

        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[1], vec!["y", "x"]);
    }

    #[test]
    fn test_zero_sweeps_keeps_input_order() {
        let g = build(&["a", "b", "x", "y"], &[("a", "y"), ("b", "x")]);
        let ranks = rank::assign(&g);
        let rows = arrange(&g, &ranks, 0);
        assert_eq!(rows[1], vec!["x", "y"]);
    }
}
