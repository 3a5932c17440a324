//! Preferential deletion process
//!
//! Drives the graph store one time step at a time: a Bernoulli trial picks
//! between preferential attachment and preferential deletion, selection
//! weights are computed over all current nodes and a weighted draw picks the
//! node to attach to or remove.

pub mod config;
pub mod harness;
pub mod process;
pub mod weights;

use crate::graph::GraphError;
use thiserror::Error;

pub use config::{HarnessConfig, ModelConfig};
pub use harness::run_harness;
pub use process::{PreferentialProcess, RunSummary, StepOutcome, StepReport, StepStats};
pub use weights::{attachment_weight, deletion_weight, WeightTable};

/// Errors raised while configuring or running the model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Step count must be positive, got {0}")]
    InvalidSteps(usize),

    #[error("Probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("Trial count must be positive, got {0}")]
    InvalidTrials(usize),

    #[error("Report interval must be positive")]
    InvalidReportInterval,

    #[error("Weighted selection over an empty graph")]
    EmptySelection,

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
