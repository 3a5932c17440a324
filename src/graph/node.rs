//! Node implementation for the evolving graph

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A node in the evolving graph
///
/// Nodes carry nothing but their code. Adjacency lives in the store and refers
/// to nodes by [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Unique code for this node
    pub id: NodeId,
}

impl Node {
    /// Create a new node with the given code
    pub fn new(id: impl Into<NodeId>) -> Self {
        Node { id: id.into() }
    }

    /// Returns the node's code
    pub fn code(&self) -> u64 {
        self.id.as_u64()
    }
}
