//! Prefdel CLI — command-line interface for the preferential deletion model
//!
//! Runs the model with user-chosen parameters and renders the results.

use anyhow::Result;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use prefdel::{ModelConfig, PreferentialProcess, RunSummary};
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(name = "prefdel", version, about = "Preferential deletion graph model")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Lines,
}

#[derive(clap::Args, Clone)]
struct RunArgs {
    /// Last time step T
    #[arg(long, default_value_t = 1000)]
    steps: usize,

    /// Probability of attaching a node at each step
    #[arg(long, short, default_value_t = 0.75)]
    probability: f64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the model one or more times
    Run {
        #[command(flatten)]
        args: RunArgs,

        /// Number of independent runs
        #[arg(long, default_value_t = 1)]
        trials: usize,

        /// Record statistics every N steps
        #[arg(long)]
        report_interval: Option<usize>,

        /// Also print the final degree distribution
        #[arg(long)]
        distribution: bool,
    },
    /// Run the model once and print every diagnostic dump of the final graph
    Dump {
        #[command(flatten)]
        args: RunArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    prefdel::init_tracing(&cli.log);

    let result = match cli.command {
        Commands::Run {
            args,
            trials,
            report_interval,
            distribution,
        } => run_trials(&args, trials, report_interval, distribution, &cli.format),
        Commands::Dump { args } => run_dump(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn model_config(args: &RunArgs, trial: usize, report_interval: Option<usize>) -> ModelConfig {
    let mut config = ModelConfig::new(args.steps, args.probability);
    config.seed = args.seed.map(|seed| seed.wrapping_add(trial as u64));
    config.report_interval = report_interval;
    config
}

fn run_trials(
    args: &RunArgs,
    trials: usize,
    report_interval: Option<usize>,
    distribution: bool,
    format: &OutputFormat,
) -> Result<()> {
    if trials == 0 {
        anyhow::bail!("--trials must be positive");
    }

    let mut summaries = Vec::with_capacity(trials);
    for trial in 0..trials {
        let mut process = PreferentialProcess::new(model_config(args, trial, report_interval))?;
        summaries.push(process.run_model()?);
        tracing::debug!("Trial {}/{} finished", trial + 1, trials);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Lines => {
            for (trial, summary) in summaries.iter().enumerate() {
                println!("# trial {} p = {}", trial + 1, summary.probability);
                for stats in &summary.trajectory {
                    println!("{}", stats);
                }
                if distribution {
                    for (degree, count) in &summary.degree_distribution {
                        println!("{} {}", degree, count);
                    }
                }
            }
        }
        OutputFormat::Table => {
            println!("{}", summary_table(&summaries));
            if distribution {
                for (trial, summary) in summaries.iter().enumerate() {
                    println!("Degree distribution, trial {}:", trial + 1);
                    println!("{}", distribution_table(&summary.degree_distribution));
                }
            }
        }
    }

    Ok(())
}

fn run_dump(args: &RunArgs) -> Result<()> {
    let mut process = PreferentialProcess::new(model_config(args, 0, None))?;
    process.run_model()?;

    let graph = process.graph();
    println!("{}", graph.adjacency_dump());
    println!("{}", graph.degree_table());
    println!("{}", graph.distribution_dump());
    println!("{}", process.attachment_dump()?);
    println!("{}", process.deletion_dump()?);
    println!("{}", graph.statistics_dump(process.steps()));

    Ok(())
}

fn summary_table(summaries: &[RunSummary]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "trial", "p", "T", "nodes", "edges", "avg degree", "attached", "deleted", "reseeds",
    ]);

    for (trial, summary) in summaries.iter().enumerate() {
        let stats = &summary.final_statistics;
        table.add_row(vec![
            (trial + 1).to_string(),
            summary.probability.to_string(),
            summary.steps.to_string(),
            stats.node_count.to_string(),
            stats.edge_count.to_string(),
            format!("{:.4}", stats.average_degree),
            summary.attachments.to_string(),
            summary.deletions.to_string(),
            summary.reseeds.to_string(),
        ]);
    }

    table
}

fn distribution_table(distribution: &BTreeMap<usize, usize>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["degree", "nodes"]);

    for (degree, count) in distribution {
        table.add_row(vec![degree.to_string(), count.to_string()]);
    }

    table
}
