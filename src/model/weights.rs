//! Selection weights and cumulative-weight sampling
//!
//! Attachment favours high-degree nodes (linear preferential attachment),
//! deletion favours low-degree nodes.

use crate::graph::{GraphResult, GraphStore, NodeId};
use serde::{Deserialize, Serialize};

/// Probability that a new node attaches to `id`: `degree / (2 * edges)`
///
/// Zero for every node when the graph has no edges.
pub fn attachment_weight(graph: &GraphStore, id: NodeId) -> GraphResult<f64> {
    let degree = graph.degree(id)?;
    let denominator = 2 * graph.edge_count();

    if denominator == 0 {
        return Ok(0.0);
    }

    Ok(degree as f64 / denominator as f64)
}

/// Probability that `id` is the node removed: `(n - degree) / (n^2 - 2 * edges)`
///
/// Zero for every node when the denominator vanishes.
pub fn deletion_weight(graph: &GraphStore, id: NodeId) -> GraphResult<f64> {
    let n = graph.node_count() as i64;
    let degree = graph.degree(id)? as i64;
    let numerator = n - degree;
    let denominator = n * n - 2 * graph.edge_count() as i64;

    if denominator == 0 || numerator == 0 {
        return Ok(0.0);
    }

    Ok(numerator as f64 / denominator as f64)
}

/// Ordered `(node, weight)` pairs, ascending by node code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    entries: Vec<(NodeId, f64)>,
}

impl WeightTable {
    /// Build a table by weighting every node of the graph in iteration order
    pub fn build<F>(graph: &GraphStore, weight: F) -> GraphResult<Self>
    where
        F: Fn(&GraphStore, NodeId) -> GraphResult<f64>,
    {
        let entries = graph
            .node_ids()
            .map(|id| weight(graph, id).map(|w| (id, w)))
            .collect::<GraphResult<Vec<_>>>()?;
        Ok(WeightTable { entries })
    }

    pub fn from_entries(entries: Vec<(NodeId, f64)>) -> Self {
        WeightTable { entries }
    }

    pub fn entries(&self) -> &[(NodeId, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of a single node, if present
    pub fn weight(&self, id: NodeId) -> Option<f64> {
        self.entries.iter().find(|(n, _)| *n == id).map(|(_, w)| *w)
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Pick a node for the uniform draw `u` in `[0, 1)`
    ///
    /// The threshold is `u * total`; the first node whose running sum reaches
    /// or exceeds it wins. When every weight is zero the first node wins.
    pub fn select(&self, u: f64) -> Option<NodeId> {
        let threshold = u * self.total();
        let mut running = 0.0;

        for &(id, w) in &self.entries {
            running += w;
            if running >= threshold {
                return Some(id);
            }
        }

        // Rounding can leave the threshold a hair above the final sum
        self.entries.last().map(|(id, _)| *id)
    }

    /// One `PREFIX(code): weight` line per node
    pub fn dump(&self, title: &str, prefix: &str) -> String {
        let mut out = format!("{}\n{}\n", title, "=".repeat(title.len()));
        for (id, w) in &self.entries {
            out.push_str(&format!("{}({}): {:?}\n", prefix, id, w));
        }
        out
    }
}
