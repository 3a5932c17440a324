//! Trial harness: runs the model over a fixed set of attachment probabilities

use super::config::HarnessConfig;
use super::process::{PreferentialProcess, RunSummary};
use super::ModelResult;
use std::io::Write;
use tracing::info;

/// Run every trial of `config`, writing the progress report to `out`
///
/// For each trial and probability this prints a banner, the statistics line at
/// t = 1 and the statistics block at t = T followed by two blank lines. Returns one summary per run, in
/// trial-major order.
pub fn run_harness<W: Write>(config: &HarnessConfig, out: &mut W) -> ModelResult<Vec<RunSummary>> {
    config.validate()?;
    info!(
        "Starting harness: {} trial(s), T = {}, p = {:?}",
        config.trials, config.steps, config.probabilities
    );

    let mut summaries = Vec::with_capacity(config.trials * config.probabilities.len());

    for trial in 1..=config.trials {
        writeln!(
            out,
            "=============== TRIAL {}/{} ===============",
            trial, config.trials
        )?;

        for model_config in config.model_configs(trial) {
            writeln!(out, "RUNNING MODEL AT P = {}", model_config.probability)?;

            let mut process = PreferentialProcess::new(model_config)?;
            let summary = process.run_model()?;

            if let Some(initial) = summary.initial() {
                writeln!(out, "{}", initial)?;
            }
            write!(out, "{}", process.graph().statistics_dump(summary.steps))?;
            writeln!(out)?;
            writeln!(out)?;

            summaries.push(summary);
        }
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;

    #[test]
    fn test_harness_output() {
        let config = HarnessConfig {
            trials: 2,
            steps: 50,
            probabilities: vec![0.6, 0.9],
            seed: Some(5),
        };
        let mut out = Vec::new();

        let summaries = run_harness(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(summaries.len(), 4);
        assert_eq!(summaries[1].probability, 0.9);
        assert!(text.starts_with("=============== TRIAL 1/2 ===============\nRUNNING MODEL AT P = 0.6\n1 1 1 1.0\n"));
        assert!(text.contains("=============== TRIAL 2/2 ==============="));
        assert_eq!(text.matches("Statistics of G at t = 50:").count(), 4);
        assert_eq!(text.matches("\n\n\nRUNNING MODEL AT P = 0.9\n").count(), 2);
        assert!(text.contains("\n\n\n=============== TRIAL 2/2 ===============\n"));
        assert!(text.ends_with("\n\n\n"));
        assert!(!text.ends_with("\n\n\n\n"));
    }

    #[test]
    fn test_harness_rejects_invalid_config() {
        let config = HarnessConfig {
            steps: 0,
            ..Default::default()
        };
        let mut out = Vec::new();

        assert!(matches!(
            run_harness(&config, &mut out),
            Err(ModelError::InvalidSteps(0))
        ));
        assert!(out.is_empty());
    }
}
