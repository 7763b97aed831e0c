//! Error types with fix suggestions
//!
//! Three disjoint channels:
//! - [`GraphError`]: structural precondition violations (self-loop,
//!   duplicate edge, dangling edge). The graph model rejects these at
//!   mutation time; the validator and layout engine re-check and fail
//!   loudly if a snapshot somehow carries one.
//! - Validation failure is NOT an error: it is the ordinary
//!   [`crate::validate::Verdict::Invalid`] outcome surfaced to the user.
//! - [`LayoutError`]: configuration problems and stale layout results.
//!   The engine never partially writes positions.

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

// ─────────────────────────────────────────────────────────────
// Structural precondition violations
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Self-loop: node '{id}' connects to itself")]
    SelfLoop { id: String },

    #[error("Duplicate edge: '{src}' → '{target}' already exists")]
    DuplicateEdge { src: String, target: String },

    #[error("Dangling edge: '{src}' → '{target}' references missing node '{missing}'")]
    DanglingEdge {
        src: String,
        target: String,
        missing: String,
    },

    #[error("Duplicate node ID: '{id}'")]
    DuplicateNode { id: String },

    #[error("Unknown node: '{id}'")]
    UnknownNode { id: String },
}

impl FixSuggestion for GraphError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            GraphError::SelfLoop { .. } => {
                Some("Remove the edge - a node cannot connect to itself")
            }
            GraphError::DuplicateEdge { .. } => {
                Some("Only one connection per (source, target) pair is allowed")
            }
            GraphError::DanglingEdge { .. } => {
                Some("Every edge endpoint must reference an existing node id")
            }
            GraphError::DuplicateNode { .. } => Some("Use unique node ids"),
            GraphError::UnknownNode { .. } => Some("Verify the node id exists in the graph"),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Layout configuration and application errors
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Unknown layout direction '{input}' (expected LR or TB)")]
    UnknownDirection { input: String },

    #[error("Invalid layout spacing: {what} must be finite and non-negative")]
    InvalidSpacing { what: &'static str },

    #[error(
        "Stale layout result: computed at revision {computed_at}, graph is at revision {current}"
    )]
    StaleLayout { computed_at: u64, current: u64 },

    #[error("Malformed graph: {0}")]
    Graph(#[from] GraphError),
}

impl FixSuggestion for LayoutError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            LayoutError::UnknownDirection { .. } => {
                Some("Use LR (left to right) or TB (top to bottom)")
            }
            LayoutError::InvalidSpacing { .. } => {
                Some("Check the layout configuration for NaN or negative spacing values")
            }
            LayoutError::StaleLayout { .. } => {
                Some("Recompute the layout from the current graph before applying it")
            }
            LayoutError::Graph(e) => e.fix_suggestion(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// CLI / document level errors
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DagEditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Graph structure error: {0}")]
    Graph(#[from] GraphError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl FixSuggestion for DagEditError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            DagEditError::Io(_) => Some("Check file path and permissions"),
            DagEditError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            DagEditError::Graph(e) => e.fix_suggestion(),
            DagEditError::Layout(e) => e.fix_suggestion(),
        }
    }
}
