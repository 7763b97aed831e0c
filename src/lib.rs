//! dagedit - headless core for an interactive DAG editor
//!
//! Graph model, validation engine and hierarchical auto-layout for a
//! canvas-based editor. The rendering surface, drag interaction and
//! keyboard wiring live elsewhere; this crate owns the semantics they
//! drive: which graphs are valid, and where nodes go on auto-layout.

pub mod doc;
pub mod editor;
pub mod errors;
pub mod graph;
pub mod idgen;
pub mod layout;
pub mod types;
pub mod validate;

pub use doc::GraphDoc;
pub use editor::{ConnectOutcome, Editor, RejectReason};
pub use errors::{DagEditError, FixSuggestion, GraphError, LayoutError};
pub use graph::{Edge, Graph, Node};
pub use idgen::{IdGenerator, SequentialIds};
pub use layout::{layout, Bounds, Direction, LayoutConfig, LayoutResult};
pub use types::{NodeId, Point};
pub use validate::{validate, InvalidReason, Verdict};
