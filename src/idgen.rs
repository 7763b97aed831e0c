//! Node id generation
//!
//! Ids are minted outside the graph core and injected into the editor, so
//! the model and the pure functions never generate identifiers. Swap the
//! generator to change the id scheme without touching the graph.

use crate::types::NodeId;

/// Source of fresh node ids, owned by the editor
pub trait IdGenerator {
    fn next_id(&mut self) -> NodeId;
}

/// Sequential `node_N` ids, the editor default
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume counting at `next`, e.g. after loading a document that
    /// already contains `node_0..node_{next-1}`
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(format!("node_{}", self.next))
            .expect("sequential ids match the id grammar");
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id().as_str(), "node_0");
        assert_eq!(ids.next_id().as_str(), "node_1");
        assert_eq!(ids.next_id().as_str(), "node_2");
    }

    #[test]
    fn test_starting_at_resumes() {
        let mut ids = SequentialIds::starting_at(7);
        assert_eq!(ids.next_id().as_str(), "node_7");
        assert_eq!(ids.next_id().as_str(), "node_8");
    }
}
