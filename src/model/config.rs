//! Run parameters for the model and the trial harness

use super::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Configuration for a single model run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Last time step `T`; steps run from 2 to `T` inclusive
    pub steps: usize,
    /// Probability `p` that a step attaches a node rather than deleting one
    pub probability: f64,
    /// Seed for the random generator (None = seeded from entropy)
    pub seed: Option<u64>,
    /// Record statistics every `n` steps in addition to the first and last
    pub report_interval: Option<usize>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            steps: 1000,
            probability: 0.75,
            seed: None,
            report_interval: None,
        }
    }
}

impl ModelConfig {
    pub fn new(steps: usize, probability: f64) -> Self {
        Self {
            steps,
            probability,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_report_interval(mut self, interval: usize) -> Self {
        self.report_interval = Some(interval);
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.steps == 0 {
            return Err(ModelError::InvalidSteps(self.steps));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ModelError::InvalidProbability(self.probability));
        }
        if self.report_interval == Some(0) {
            return Err(ModelError::InvalidReportInterval);
        }
        Ok(())
    }
}

/// Configuration for a batch of trials over several attachment probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub trials: usize,
    pub steps: usize,
    pub probabilities: Vec<f64>,
    /// Base seed; run `k` of the batch uses `seed + k` (wrapping)
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            trials: 1,
            steps: 1000,
            probabilities: vec![0.6, 0.75, 0.9],
            seed: None,
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> ModelResult<()> {
        if self.trials == 0 {
            return Err(ModelError::InvalidTrials(self.trials));
        }
        for config in self.model_configs(1) {
            config.validate()?;
        }
        Ok(())
    }

    /// Model configurations for one trial, in probability order
    pub fn model_configs(&self, trial: usize) -> Vec<ModelConfig> {
        let per_trial = self.probabilities.len();
        self.probabilities
            .iter()
            .enumerate()
            .map(|(k, &probability)| ModelConfig {
                steps: self.steps,
                probability,
                seed: self.seed.map(|base| {
                    base.wrapping_add((trial.saturating_sub(1) * per_trial + k) as u64)
                }),
                report_interval: None,
            })
            .collect()
    }
}
