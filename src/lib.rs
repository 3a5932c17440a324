//! Preferential Deletion Model
//!
//! Simulates a dynamic random graph in which, at every time step, a node is
//! either added (attached to an existing node chosen proportionally to its
//! degree) or removed (chosen with a weight that falls as its degree grows).
//!
//! # Architecture
//!
//! - [`graph`]: the undirected graph store (node registry, neighbor sequences,
//!   edge count, cascading node deletion, statistics and dumps)
//! - [`model`]: the preferential process driving the store, its configuration
//!   and the trial harness
//!
//! ## Example Usage
//!
//! ```rust
//! use prefdel::graph::{GraphStore, NodeId};
//! use prefdel::model::{ModelConfig, PreferentialProcess};
//!
//! // Seed graph: node 1 with a self-loop
//! let mut store = GraphStore::seeded();
//! store.add_node(NodeId(1), NodeId(2)).unwrap();
//! assert_eq!(store.edge_count(), 2);
//! assert_eq!(store.degree(NodeId(1)), Ok(2));
//!
//! // A reproducible run
//! let config = ModelConfig::new(200, 0.75).with_seed(7);
//! let mut process = PreferentialProcess::new(config).unwrap();
//! let summary = process.run_model().unwrap();
//! assert_eq!(summary.trajectory.first().unwrap().t, 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod model;

// Re-export main types for convenience
pub use graph::{GraphError, GraphResult, GraphStatistics, GraphStore, Node, NodeId};

pub use model::{
    HarnessConfig, ModelConfig, ModelError, ModelResult, PreferentialProcess, RunSummary,
    StepOutcome, StepReport, StepStats, WeightTable,
};

use tracing_subscriber::EnvFilter;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

/// Install the stderr `fmt` subscriber
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
