//! Graph documents on disk
//!
//! YAML schema:
//!
//! ```yaml
//! nodes:
//!   - id: fetch
//!     label: Fetch input
//!     position: { x: 0.0, y: 0.0 }
//!   - id: parse
//!     label: Parse
//! edges:
//!   - source: fetch
//!     target: parse
//! ```
//!
//! `position` is optional and defaults to the origin; the auto-layout
//! command overwrites it anyway. Parsing is permissive, conversion into a
//! [`Graph`] is not: every structural invariant is checked there.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::DagEditError;
use crate::graph::{Edge, Graph, Node};

/// Serde image of a graph file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GraphDoc {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDoc {
    pub fn from_yaml(yaml: &str) -> Result<Self, DagEditError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String, DagEditError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DagEditError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DagEditError> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Convert into a checked graph model
    pub fn into_graph(self) -> Result<Graph, DagEditError> {
        Ok(Graph::from_parts(self.nodes, self.edges)?)
    }

    /// Snapshot a graph back into document form
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
        }
    }
}
