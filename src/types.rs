//! NewType wrappers for type safety
//!
//! Keeps raw strings from leaking through the graph API and puts id
//! validation in one place.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// NODE ID
// ============================================================================

/// Node ID format: starts with a letter, alphanumeric with hyphens/underscores
static NODE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").unwrap());

/// Strongly-typed node identifier
///
/// Guarantees:
/// - Non-empty, starts with a letter
/// - Alphanumeric plus dash/underscore
/// - Maximum 64 characters
///
/// Ids are opaque to the core: they are assigned by the editor (see
/// [`crate::idgen`]) and never generated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Maximum allowed length
    pub const MAX_LENGTH: usize = 64;

    /// Create a new NodeId with validation
    pub fn new(id: impl AsRef<str>) -> Result<Self, NodeIdError> {
        let id = id.as_ref();

        if id.is_empty() {
            return Err(NodeIdError::Empty);
        }
        if id.len() > Self::MAX_LENGTH {
            return Err(NodeIdError::TooLong(id.len()));
        }
        if !NODE_ID_RE.is_match(id) {
            return Err(NodeIdError::InvalidFormat(id.to_string()));
        }

        Ok(NodeId(id.to_string()))
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = NodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeId::new(s)
    }
}

impl TryFrom<String> for NodeId {
    type Error = NodeIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        NodeId::new(&s)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> String {
        id.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NodeIdError {
    #[error("Node ID cannot be empty")]
    Empty,
    #[error("Node ID too long ({0} > {})", NodeId::MAX_LENGTH)]
    TooLong(usize),
    #[error("Node ID must start with a letter and contain only alphanumeric characters, hyphens, or underscores: '{0}'")]
    InvalidFormat(String),
}

// ============================================================================
// POINT
// ============================================================================

/// A 2-D canvas position, top-left anchored by convention
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
