//! Hierarchical auto-layout
//!
//! Sugiyama-style pipeline over a graph snapshot:
//! 1. rank assignment (longest path, [`rank`])
//! 2. ordering within ranks (barycenter, [`order`])
//! 3. coordinate assignment (here)
//!
//! The engine computes node centers on a rank grid, then returns top-left
//! anchored positions by shifting half the node extent. The rendering
//! surface expects top-left anchors; keep the convention.
//!
//! Layout never changes topology and never partially writes: the result
//! is a complete mapping covering every input node, or an error before
//! any position is produced. Cyclic input is not ranked meaningfully but
//! still yields a complete, non-crashing arrangement (see [`rank`]).

mod order;
mod rank;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::errors::LayoutError;
use crate::graph::Graph;
use crate::types::{NodeId, Point};

/// Layout direction: which axis ranks grow along
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Ranks grow along x ("LR")
    #[default]
    LeftToRight,
    /// Ranks grow along y ("TB")
    TopToBottom,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "LR",
            Direction::TopToBottom => "TB",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LR" => Ok(Direction::LeftToRight),
            "TB" => Ok(Direction::TopToBottom),
            other => Err(LayoutError::UnknownDirection {
                input: other.to_string(),
            }),
        }
    }
}

/// Layout configuration
///
/// Node extent is fixed system-wide; every node is drawn at the same
/// logical size, so it lives here rather than on [`crate::graph::Node`].
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub direction: Direction,
    /// Fixed node width
    pub node_width: f64,
    /// Fixed node height
    pub node_height: f64,
    /// Spacing between consecutive ranks (primary axis)
    pub rank_sep: f64,
    /// Spacing between nodes within a rank (cross axis)
    pub node_sep: f64,
    /// Number of barycenter ordering sweeps
    pub ordering_sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::LeftToRight,
            node_width: 172.0,
            node_height: 36.0,
            rank_sep: 60.0,
            node_sep: 30.0,
            ordering_sweeps: 4,
        }
    }
}

impl LayoutConfig {
    fn check(&self) -> Result<(), LayoutError> {
        for (value, what) in [
            (self.node_width, "node_width"),
            (self.node_height, "node_height"),
            (self.rank_sep, "rank_sep"),
            (self.node_sep, "node_sep"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidSpacing { what });
            }
        }
        Ok(())
    }
}

/// Bounding box of a laid-out graph, for the view refit step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Complete layout output: one position per input node, top-left
/// anchored, plus the revision of the snapshot it was computed from.
/// [`crate::editor::Editor::apply_layout`] refuses results whose revision
/// no longer matches the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub positions: BTreeMap<NodeId, Point>,
    pub bounds: Bounds,
    pub revision: u64,
}

/// Compute a layered layout for the graph.
///
/// Pure and deterministic: the same snapshot and config always produce
/// the same positions. Errors are reported before any position is
/// computed, so the caller never observes partial output.
pub fn layout(graph: &Graph, config: &LayoutConfig) -> Result<LayoutResult, LayoutError> {
    config.check()?;
    graph.check_invariants()?;

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        direction = %config.direction,
        "computing layout"
    );

    let ranks = rank::assign(graph);
    let rows = order::arrange(graph, &ranks, config.ordering_sweeps);

    let (primary_extent, cross_extent) = match config.direction {
        Direction::LeftToRight => (config.node_width, config.node_height),
        Direction::TopToBottom => (config.node_height, config.node_width),
    };

    let row_span = |len: usize| -> f64 {
        if len == 0 {
            0.0
        } else {
            len as f64 * cross_extent + (len - 1) as f64 * config.node_sep
        }
    };
    let max_span = rows.iter().map(|row| row_span(row.len())).fold(0.0, f64::max);

    let mut positions: BTreeMap<NodeId, Point> = BTreeMap::new();
    for (rank_idx, row) in rows.iter().enumerate() {
        let primary_center =
            rank_idx as f64 * (primary_extent + config.rank_sep) + primary_extent / 2.0;
        // center each rank on the widest one
        let start = (max_span - row_span(row.len())) / 2.0;

        for (slot, &id) in row.iter().enumerate() {
            let cross_center =
                start + slot as f64 * (cross_extent + config.node_sep) + cross_extent / 2.0;
            let (center_x, center_y) = match config.direction {
                Direction::LeftToRight => (primary_center, cross_center),
                Direction::TopToBottom => (cross_center, primary_center),
            };
            let node_id = graph
                .get_node(id)
                .expect("rows come from the graph's own nodes")
                .id
                .clone();
            positions.insert(
                node_id,
                Point::new(
                    center_x - config.node_width / 2.0,
                    center_y - config.node_height / 2.0,
                ),
            );
        }
    }

    let bounds = compute_bounds(&positions, config);

    Ok(LayoutResult {
        positions,
        bounds,
        revision: graph.revision(),
    })
}

fn compute_bounds(positions: &BTreeMap<NodeId, Point>, config: &LayoutConfig) -> Bounds {
    if positions.is_empty() {
        return Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        };
    }

    let mut bounds = Bounds {
        min_x: f64::MAX,
        min_y: f64::MAX,
        max_x: f64::MIN,
        max_y: f64::MIN,
    };
    for point in positions.values() {
        bounds.min_x = bounds.min_x.min(point.x);
        bounds.min_y = bounds.min_y.min(point.y);
        bounds.max_x = bounds.max_x.max(point.x + config.node_width);
        bounds.max_y = bounds.max_y.max(point.y + config.node_height);
    }
    bounds
}
