//! Graph store for the preferential deletion model
//!
//! This module implements the evolving undirected graph:
//! - Nodes identified by increasing integer codes
//! - Neighbor sequences kept in insertion order
//! - Edge add/remove with cascading node deletion
//! - Aggregate statistics and diagnostic dumps

pub mod dump;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use node::Node;
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::NodeId;
