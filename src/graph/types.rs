//! Core type definitions for the graph engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node code: unique identifier handed out in strictly increasing order.
///
/// The seed node always carries code 1; a node created at step `t` carries code `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Code of the node every fresh graph is seeded with
    pub const SEED: NodeId = NodeId(1);

    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "42");

        let id2: NodeId = 100u64.into();
        assert_eq!(id2.as_u64(), 100);

        let id3: NodeId = 7usize.into();
        assert_eq!(id3, NodeId(7));
    }

    #[test]
    fn test_seed_code() {
        assert_eq!(NodeId::SEED.as_u64(), 1);
    }

    #[test]
    fn test_id_ordering() {
        let id1 = NodeId::new(1);
        let id2 = NodeId::new(2);
        assert!(id1 < id2);
    }
}
