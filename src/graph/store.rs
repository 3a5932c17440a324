//! In-memory graph storage for the preferential deletion model
//!
//! Keeps an undirected adjacency structure keyed by node code:
//! - nodes: NodeId -> Node (node registry)
//! - adjacency: NodeId -> Vec<NodeId> (neighbor sequence, insertion order)
//! - edge_count: number of undirected edges currently present
//!
//! Both maps preserve insertion order. Codes are handed out in increasing
//! order and removal is order-preserving, so iteration is ascending by code.

use super::node::Node;
use super::types::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Aggregate statistics of the graph at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
}

/// In-memory undirected graph storage
///
/// Each non-loop edge is recorded once in each endpoint's neighbor sequence.
/// A self-loop is recorded once, in the single sequence of its node, so
/// `2 * edge_count == total_degree() + self_loop_count()` always holds.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// Node registry
    nodes: IndexMap<NodeId, Node>,

    /// Neighbor sequence for each node
    adjacency: IndexMap<NodeId, Vec<NodeId>>,

    /// Number of undirected edges
    edge_count: usize,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            nodes: IndexMap::new(),
            adjacency: IndexMap::new(),
            edge_count: 0,
        }
    }

    /// Create a store already holding the single self-looped seed node
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.initialize();
        store
    }

    /// Reset the graph to the seed state: node 1 connected to itself, one edge
    pub fn initialize(&mut self) {
        self.clear();

        let seed = NodeId::SEED;
        self.nodes.insert(seed, Node::new(seed));
        self.adjacency.insert(seed, vec![seed]);
        self.edge_count = 1;

        debug!("Graph initialized with seed node {}", seed);
    }

    /// Register a node in both the registry and the adjacency structure if new
    fn register(&mut self, id: NodeId) {
        self.nodes.entry(id).or_insert_with(|| Node::new(id));
        self.adjacency.entry(id).or_default();
    }

    /// Add an undirected edge between `a` and `b`
    ///
    /// Unknown endpoints are registered. Returns `false` (and logs a warning)
    /// when the edge already exists; the graph is left untouched in that case.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if self.has_edge(a, b) {
            warn!("Graph already contains edge ({}, {})", a, b);
            return false;
        }

        self.register(a);
        self.register(b);

        if let Some(list) = self.adjacency.get_mut(&a) {
            list.push(b);
        }
        if a != b {
            if let Some(list) = self.adjacency.get_mut(&b) {
                list.push(a);
            }
        }

        self.edge_count += 1;
        true
    }

    /// Create node `id` and connect it to the existing node `neighbor`
    pub fn add_node(&mut self, neighbor: NodeId, id: NodeId) -> GraphResult<NodeId> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::NodeAlreadyExists(id));
        }
        if !self.has_node(neighbor) {
            return Err(GraphError::NodeNotFound(neighbor));
        }

        self.nodes.insert(id, Node::new(id));
        self.adjacency.insert(id, Vec::new());
        self.add_edge(id, neighbor);

        Ok(id)
    }

    /// Remove the first occurrence of `target` from `source`'s neighbor sequence
    fn unlink(&mut self, source: NodeId, target: NodeId) {
        if let Some(list) = self.adjacency.get_mut(&source) {
            if let Some(pos) = list.iter().position(|n| *n == target) {
                list.remove(pos);
            }
        }
    }

    /// Delete the undirected edge between `a` and `b`
    ///
    /// Returns `false` (and logs a warning) when no such edge exists.
    pub fn delete_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if !self.has_edge(a, b) {
            warn!("Edge ({}, {}) does not exist in graph", a, b);
            return false;
        }

        self.unlink(a, b);
        if a != b {
            self.unlink(b, a);
        }

        self.edge_count -= 1;
        true
    }

    /// Delete node `id` together with every edge incident to it
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let degree = self
            .adjacency
            .get(&id)
            .map(Vec::len)
            .ok_or(GraphError::NodeNotFound(id))?;

        debug!("Deleting node {} (degree {})", id, degree);

        match degree {
            0 => {}
            1 => self.detach_single_edge(id),
            _ => {
                self.cascade_edges(id);
                self.detach_single_edge(id);
            }
        }

        self.adjacency.shift_remove(&id);
        self.nodes
            .shift_remove(&id)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Remove edges of `id` one at a time until at most one remains.
    ///
    /// The live sequence is re-read after every removal because each removal
    /// shrinks it.
    fn cascade_edges(&mut self, id: NodeId) {
        loop {
            let next = match self.adjacency.get(&id) {
                Some(list) if list.len() > 1 => list[0],
                _ => break,
            };
            self.delete_edge(id, next);
        }
    }

    /// Remove the remaining edge of `id`, if any
    fn detach_single_edge(&mut self, id: NodeId) {
        if let Some(&only) = self.adjacency.get(&id).and_then(|list| list.first()) {
            self.delete_edge(id, only);
        }
    }

    /// Check whether `b` appears in `a`'s neighbor sequence
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(&a)
            .map(|list| list.contains(&b))
            .unwrap_or(false)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of entries in the node's neighbor sequence
    ///
    /// A self-loop contributes 1, since its node is stored once.
    pub fn degree(&self, id: NodeId) -> GraphResult<usize> {
        match self.adjacency.get(&id) {
            Some(list) => Ok(list.len()),
            None => {
                error!("Node {} does not exist in the graph", id);
                Err(GraphError::NodeNotFound(id))
            }
        }
    }

    /// Neighbor sequence of a node, in insertion order
    pub fn neighbors(&self, id: NodeId) -> Option<&[NodeId]> {
        self.adjacency.get(&id).map(Vec::as_slice)
    }

    /// Look a node up by code
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// All nodes, ascending by code
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// All node codes, ascending by code
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Neighbor sequences of every node, ascending by code
    pub fn adjacency(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> + '_ {
        self.adjacency.iter().map(|(id, list)| (*id, list.as_slice()))
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of entries in the node registry
    pub fn registry_len(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Sum of the lengths of all neighbor sequences
    pub fn total_degree(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Number of nodes connected to themselves
    pub fn self_loop_count(&self) -> usize {
        self.adjacency
            .iter()
            .filter(|(id, list)| list.contains(*id))
            .count()
    }

    /// Average length of the neighbor sequences (0.0 for an empty graph)
    pub fn average_degree(&self) -> f64 {
        if self.adjacency.is_empty() {
            return 0.0;
        }
        self.total_degree() as f64 / self.adjacency.len() as f64
    }

    /// Histogram mapping each degree value to the number of nodes having it
    pub fn degree_distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::new();
        for list in self.adjacency.values() {
            *distribution.entry(list.len()).or_insert(0) += 1;
        }
        distribution
    }

    /// Snapshot of node count, edge count and average degree
    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count,
            average_degree: self.average_degree(),
        }
    }

    /// Check the structural invariants of the store
    ///
    /// Registry and adjacency hold the same codes, every edge is mirrored in
    /// both endpoint sequences, no sequence repeats a neighbor, and the edge
    /// counter matches the sequences.
    pub fn is_consistent(&self) -> bool {
        if self.nodes.len() != self.adjacency.len() {
            return false;
        }
        if !self.adjacency.keys().all(|id| self.nodes.contains_key(id)) {
            return false;
        }

        for (id, list) in &self.adjacency {
            for (pos, neighbor) in list.iter().enumerate() {
                if list[..pos].contains(neighbor) {
                    return false;
                }
                if !self.has_edge(*neighbor, *id) {
                    return false;
                }
            }
        }

        2 * self.edge_count == self.total_degree() + self.self_loop_count()
    }

    /// Clear all data
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.adjacency.clear();
        self.edge_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_edge(NodeId(1), NodeId(2));
        store.add_edge(NodeId(2), NodeId(3));
        store
    }

    #[test]
    fn test_initialize() {
        let store = GraphStore::seeded();

        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 1);
        assert!(store.has_node(NodeId(1)));
        assert!(store.has_edge(NodeId(1), NodeId(1)));
        assert_eq!(store.average_degree(), 1.0);
        assert_eq!(store.self_loop_count(), 1);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_initialize_resets_existing_graph() {
        let mut store = path_graph();
        store.initialize();

        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 1);
        assert!(!store.has_node(NodeId(2)));
    }

    #[test]
    fn test_add_node_to_seed() {
        let mut store = GraphStore::seeded();
        let id = store.add_node(NodeId(1), NodeId(2)).unwrap();

        assert_eq!(id, NodeId(2));
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.degree(NodeId(2)), Ok(1));
        assert_eq!(store.degree(NodeId(1)), Ok(2));
        assert_eq!(store.neighbors(NodeId(1)), Some(&[NodeId(1), NodeId(2)][..]));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_add_node_validation() {
        let mut store = GraphStore::seeded();

        assert_eq!(
            store.add_node(NodeId(1), NodeId(1)),
            Err(GraphError::NodeAlreadyExists(NodeId(1)))
        );
        assert_eq!(
            store.add_node(NodeId(9), NodeId(2)),
            Err(GraphError::NodeNotFound(NodeId(9)))
        );
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_registers_nodes() {
        let mut store = GraphStore::new();
        assert!(store.add_edge(NodeId(4), NodeId(5)));

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.registry_len(), 2);
        assert!(store.node(NodeId(4)).is_some());
        assert!(store.has_edge(NodeId(5), NodeId(4)));
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let mut store = path_graph();
        let before = store.clone();

        assert!(!store.add_edge(NodeId(1), NodeId(2)));
        assert!(!store.add_edge(NodeId(2), NodeId(1)));

        assert_eq!(store.edge_count(), before.edge_count());
        assert_eq!(store.neighbors(NodeId(1)), before.neighbors(NodeId(1)));
        assert_eq!(store.neighbors(NodeId(2)), before.neighbors(NodeId(2)));
    }

    #[test]
    fn test_delete_edge() {
        let mut store = path_graph();

        assert!(store.delete_edge(NodeId(2), NodeId(1)));
        assert_eq!(store.edge_count(), 1);
        assert!(!store.has_edge(NodeId(1), NodeId(2)));
        assert!(!store.has_edge(NodeId(2), NodeId(1)));

        // Already gone
        assert!(!store.delete_edge(NodeId(1), NodeId(2)));
        assert_eq!(store.edge_count(), 1);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_delete_self_loop() {
        let mut store = GraphStore::seeded();

        assert!(store.delete_edge(NodeId(1), NodeId(1)));
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.degree(NodeId(1)), Ok(0));
        assert!(store.has_node(NodeId(1)));
    }

    #[test]
    fn test_delete_node_middle_of_path() {
        let mut store = path_graph();
        let edges_before = store.edge_count();

        let removed = store.delete_node(NodeId(2)).unwrap();

        assert_eq!(removed.id, NodeId(2));
        assert!(!store.has_node(NodeId(2)));
        assert_eq!(store.edge_count(), edges_before - 2);
        assert_eq!(store.degree(NodeId(1)), Ok(0));
        assert_eq!(store.degree(NodeId(3)), Ok(0));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_delete_node_degree_zero_and_one() {
        let mut store = path_graph();

        // Degree one
        store.delete_node(NodeId(3)).unwrap();
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.degree(NodeId(2)), Ok(1));

        store.delete_edge(NodeId(1), NodeId(2));

        // Degree zero
        store.delete_node(NodeId(1)).unwrap();
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_delete_hub_with_self_loop() {
        let mut store = GraphStore::seeded();
        for code in 2..=6u64 {
            store.add_node(NodeId(1), NodeId(code)).unwrap();
        }
        assert_eq!(store.degree(NodeId(1)), Ok(6));

        store.delete_node(NodeId(1)).unwrap();

        assert_eq!(store.node_count(), 5);
        assert_eq!(store.edge_count(), 0);
        for (_, neighbors) in store.adjacency() {
            assert!(!neighbors.contains(&NodeId(1)));
        }
        assert!(store.is_consistent());
    }

    #[test]
    fn test_delete_missing_node() {
        let mut store = GraphStore::seeded();
        assert_eq!(
            store.delete_node(NodeId(42)),
            Err(GraphError::NodeNotFound(NodeId(42)))
        );
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn test_degree_of_missing_node() {
        let store = GraphStore::new();
        assert_eq!(
            store.degree(NodeId(1)),
            Err(GraphError::NodeNotFound(NodeId(1)))
        );
        assert!(store.neighbors(NodeId(1)).is_none());
    }

    #[test]
    fn test_degree_distribution() {
        let mut store = GraphStore::seeded();
        store.add_node(NodeId(1), NodeId(2)).unwrap();
        store.add_node(NodeId(1), NodeId(3)).unwrap();
        store.add_node(NodeId(2), NodeId(4)).unwrap();

        // 1: [1, 2, 3], 2: [1, 4], 3: [1], 4: [2]
        let distribution = store.degree_distribution();
        assert_eq!(distribution.get(&1), Some(&2));
        assert_eq!(distribution.get(&2), Some(&1));
        assert_eq!(distribution.get(&3), Some(&1));
        assert_eq!(distribution.values().sum::<usize>(), store.node_count());
    }

    #[test]
    fn test_statistics_and_order() {
        let mut store = GraphStore::seeded();
        store.add_node(NodeId(1), NodeId(2)).unwrap();
        store.add_node(NodeId(2), NodeId(3)).unwrap();
        store.delete_node(NodeId(2)).unwrap();
        store.add_node(NodeId(3), NodeId(4)).unwrap();

        let ids: Vec<NodeId> = store.node_ids().collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(3), NodeId(4)]);
        let registered: Vec<NodeId> = store.nodes().map(|node| node.id).collect();
        assert_eq!(registered, ids);

        let stats = store.statistics();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert!((stats.average_degree - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_graph_average_degree() {
        let store = GraphStore::new();
        assert!(store.is_empty());
        assert_eq!(store.average_degree(), 0.0);
        assert!(store.degree_distribution().is_empty());
    }
}
