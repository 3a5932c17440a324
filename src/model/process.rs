//! The preferential deletion process
//!
//! Each time step draws `u` uniform in `[0, 1)`. When `u < p` a new node is
//! attached to an existing node chosen proportionally to its degree; otherwise
//! an existing node is removed, chosen with a weight that decreases with its
//! degree. A graph that loses its last node is re-seeded before the next step.

use super::config::ModelConfig;
use super::weights::{attachment_weight, deletion_weight, WeightTable};
use super::{ModelError, ModelResult};
use crate::graph::{GraphStatistics, GraphStore, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// What a single step did to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The graph was empty and got the seed node instead of a new node
    Seeded,
    /// `node` was created and connected to `neighbor`
    Attached { node: NodeId, neighbor: NodeId },
    /// `node` and all its edges were removed
    Deleted { node: NodeId },
    /// Deletion was drawn on an empty graph
    Skipped,
}

/// Outcome of step `t`, and whether the graph had to be re-seeded afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub t: usize,
    pub outcome: StepOutcome,
    pub reseeded: bool,
}

/// Statistics line recorded at step `t`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    pub t: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
}

impl StepStats {
    pub fn capture(t: usize, graph: &GraphStore) -> Self {
        let stats = graph.statistics();
        StepStats {
            t,
            node_count: stats.node_count,
            edge_count: stats.edge_count,
            average_degree: stats.average_degree,
        }
    }
}

impl fmt::Display for StepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:?}",
            self.t, self.node_count, self.edge_count, self.average_degree
        )
    }
}

/// Result of a complete run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub probability: f64,
    pub steps: usize,
    pub seed: Option<u64>,
    /// Steps that attached a node (including re-seeding an empty graph)
    pub attachments: usize,
    /// Steps that removed a node
    pub deletions: usize,
    /// Times the graph collapsed and was re-seeded
    pub reseeds: usize,
    /// Statistics at t = 1, at every report interval and at t = T
    pub trajectory: Vec<StepStats>,
    pub final_statistics: GraphStatistics,
    pub degree_distribution: BTreeMap<usize, usize>,
}

impl RunSummary {
    /// Statistics recorded right after seeding
    pub fn initial(&self) -> Option<&StepStats> {
        self.trajectory.first()
    }

    /// Statistics recorded at the last step
    pub fn last(&self) -> Option<&StepStats> {
        self.trajectory.last()
    }
}

/// Dynamic random-graph model with preferential attachment and deletion
///
/// Generic over the random generator so tests can inject a seeded or scripted
/// source. The default generator is [`StdRng`].
#[derive(Debug)]
pub struct PreferentialProcess<R = StdRng> {
    config: ModelConfig,
    graph: GraphStore,
    rng: R,
}

impl PreferentialProcess<StdRng> {
    /// Create a process from a validated configuration
    ///
    /// Uses `config.seed` when present, entropy otherwise.
    pub fn new(config: ModelConfig) -> ModelResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a process from a step budget and attachment probability
    pub fn from_params(steps: usize, probability: f64) -> ModelResult<Self> {
        Self::new(ModelConfig::new(steps, probability))
    }
}

impl<R: Rng> PreferentialProcess<R> {
    /// Create a process drawing from the given generator
    pub fn with_rng(config: ModelConfig, rng: R) -> ModelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            graph: GraphStore::new(),
            rng,
        })
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut GraphStore {
        &mut self.graph
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn probability(&self) -> f64 {
        self.config.probability
    }

    pub fn steps(&self) -> usize {
        self.config.steps
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Reset the graph to the single seed node
    pub fn initialize(&mut self) {
        self.graph.initialize();
    }

    /// Attachment weight of every node, ascending by code
    pub fn attachment_weights(&self) -> ModelResult<WeightTable> {
        Ok(WeightTable::build(&self.graph, attachment_weight)?)
    }

    /// Deletion weight of every node, ascending by code
    pub fn deletion_weights(&self) -> ModelResult<WeightTable> {
        Ok(WeightTable::build(&self.graph, deletion_weight)?)
    }

    /// Run one time step
    pub fn step(&mut self, t: usize) -> ModelResult<StepReport> {
        let u: f64 = self.rng.gen();

        let outcome = if u < self.config.probability {
            self.create_node(t)?
        } else {
            match self.delete_random_node()? {
                Some(node) => StepOutcome::Deleted { node },
                None => StepOutcome::Skipped,
            }
        };

        let reseeded = self.graph.is_empty();
        if reseeded {
            debug!("Graph emptied at t = {}, re-seeding", t);
            self.graph.initialize();
        }

        Ok(StepReport {
            t,
            outcome,
            reseeded,
        })
    }

    /// Preferential attachment: create node `t` next to a degree-weighted pick
    pub fn create_node(&mut self, t: usize) -> ModelResult<StepOutcome> {
        if self.graph.is_empty() {
            self.graph.initialize();
            return Ok(StepOutcome::Seeded);
        }

        let table = self.attachment_weights()?;
        let u: f64 = self.rng.gen();
        let neighbor = table.select(u).ok_or(ModelError::EmptySelection)?;
        let node = self.graph.add_node(neighbor, NodeId::from(t))?;

        debug!("t = {}: attached node {} to {}", t, node, neighbor);
        Ok(StepOutcome::Attached { node, neighbor })
    }

    /// Preferential deletion: remove a node picked by inverse-degree weight
    ///
    /// Returns `None` when the graph is empty.
    pub fn delete_random_node(&mut self) -> ModelResult<Option<NodeId>> {
        let table = self.deletion_weights()?;
        if table.is_empty() {
            return Ok(None);
        }

        let u: f64 = self.rng.gen();
        let node = table.select(u).ok_or(ModelError::EmptySelection)?;
        self.graph.delete_node(node)?;

        debug!("Deleted node {}", node);
        Ok(Some(node))
    }

    /// Seed the graph and run steps 2 through `T`
    pub fn run_model(&mut self) -> ModelResult<RunSummary> {
        let steps = self.config.steps;
        info!(
            "Running preferential deletion model: T = {}, p = {}",
            steps, self.config.probability
        );

        self.graph.initialize();
        let mut trajectory = vec![StepStats::capture(1, &self.graph)];
        let mut attachments = 0;
        let mut deletions = 0;
        let mut reseeds = 0;

        for t in 2..=steps {
            let report = self.step(t)?;

            match report.outcome {
                StepOutcome::Seeded | StepOutcome::Attached { .. } => attachments += 1,
                StepOutcome::Deleted { .. } => deletions += 1,
                StepOutcome::Skipped => {}
            }
            if report.reseeded {
                reseeds += 1;
            }

            if let Some(interval) = self.config.report_interval {
                if t % interval == 0 && t < steps {
                    trajectory.push(StepStats::capture(t, &self.graph));
                }
            }
        }

        if steps > 1 {
            trajectory.push(StepStats::capture(steps, &self.graph));
        }

        let final_statistics = self.graph.statistics();
        info!(
            "Run finished: {} nodes, {} edges, average degree {:.4}",
            final_statistics.node_count, final_statistics.edge_count, final_statistics.average_degree
        );

        Ok(RunSummary {
            probability: self.config.probability,
            steps,
            seed: self.config.seed,
            attachments,
            deletions,
            reseeds,
            trajectory,
            final_statistics,
            degree_distribution: self.graph.degree_distribution(),
        })
    }

    /// Attachment weight table in the `LPA(code): weight` format
    pub fn attachment_dump(&self) -> ModelResult<String> {
        Ok(self.attachment_weights()?.dump("LPA Values in G:", "LPA"))
    }

    /// Deletion weight table in the `PD(code): weight` format
    pub fn deletion_dump(&self) -> ModelResult<String> {
        Ok(self.deletion_weights()?.dump("PD Values in G:", "PD"))
    }
}
