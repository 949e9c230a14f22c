//! rinq CLI - pick the most central nodes of a network from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Node, edge and degree summary
//! rinq stats contacts.csv
//!
//! # Rank nodes by a centrality measure
//! rinq centrality contacts.csv --measure subgraph --top 10
//! rinq centrality contacts.csv --measure estrada --terms 50
//!
//! # Select the 5 jointly most central nodes
//! rinq select contacts.csv --tau 5 --solver discrete --reads 2000
//! rinq select contacts.csv --tau 5 --solver continuous --json
//! ```
//!
//! Input is a headerless CSV edge list, `a,b` or `a,b,weight` per line.
//! Set `RUST_LOG` or pass `-v` for solver diagnostics on stderr.

mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::ProgressBar;
use input::read_edge_list;
use rinq_core::algo::centrality::{
    degree_vector, eigenvector_centrality, estrada_centrality_series, estrada_index, rank_nodes,
    subgraph_centrality, EigenvectorConfig, DEFAULT_SERIES_TERMS,
};
use rinq_core::qubo::FormulationParams;
use rinq_core::{
    formulate, Adjacency, ContinuousAnnealer, ContinuousConfig, DiscreteAnnealer, QuboConfig,
    SampleParams, SimulatedAnnealingSampler, SolveOutcome,
};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rinq")]
#[command(about = "Central-node selection via QUBO annealing", long_about = None)]
struct Cli {
    /// Log solver progress at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics about a graph
    Stats {
        /// Edge list (CSV)
        input: PathBuf,
    },

    /// Rank nodes by a centrality measure
    Centrality {
        /// Edge list (CSV)
        input: PathBuf,

        /// Centrality measure
        #[arg(short, long, default_value = "subgraph")]
        measure: Measure,

        /// Series terms for the Estrada measure
        #[arg(long, default_value_t = DEFAULT_SERIES_TERMS)]
        terms: usize,

        /// Number of top nodes to show
        #[arg(short, long, default_value = "20")]
        top: usize,
    },

    /// Select exactly tau central nodes by solving the QUBO
    Select {
        /// Edge list (CSV)
        input: PathBuf,

        /// Number of nodes to select
        #[arg(long)]
        tau: usize,

        /// Solver
        #[arg(long, default_value = "discrete")]
        solver: Solver,

        /// Independent reads (default: 1000 continuous, 10000 discrete)
        #[arg(long)]
        reads: Option<usize>,

        /// Centrality weight P0 (default: 1/sqrt(n))
        #[arg(long)]
        p0: Option<f64>,

        /// Cardinality penalty weight P1 (default: 10n)
        #[arg(long)]
        p1: Option<f64>,

        /// Lower end of the inverse-temperature range (discrete)
        #[arg(long, default_value = "0.1")]
        beta_min: f64,

        /// Upper end of the inverse-temperature range (discrete)
        #[arg(long, default_value = "4.0")]
        beta_max: f64,

        /// Sweeps per read (discrete)
        #[arg(long, default_value = "1000")]
        sweeps: usize,

        /// Iterations per read (continuous)
        #[arg(long, default_value = "100")]
        max_iter: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Measure {
    /// Power-iteration eigenvector centrality
    Eigenvector,
    /// Truncated-series Estrada centrality
    Estrada,
    /// Exact subgraph centrality (matrix exponential diagonal)
    Subgraph,
}

#[derive(Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Solver {
    /// Continuous relaxation with rounding
    Continuous,
    /// Simulated annealing over binary states
    Discrete,
}

/// Options for `rinq select`, mirroring the flags.
struct SelectOptions {
    tau: usize,
    solver: Solver,
    reads: Option<usize>,
    qubo: QuboConfig,
    beta_range: (f64, f64),
    sweeps: usize,
    max_iter: usize,
    seed: u64,
    json: bool,
}

#[derive(Serialize)]
struct SelectReport<'a> {
    solver: Solver,
    tau: usize,
    formulation: Option<FormulationParams>,
    selected: Vec<&'a str>,
    nodes: Vec<usize>,
    energy: Option<f64>,
    feasible_reads: usize,
    total_reads: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Stats { input } => cmd_stats(&input),
        Commands::Centrality {
            input,
            measure,
            terms,
            top,
        } => cmd_centrality(&input, measure, terms, top),
        Commands::Select {
            input,
            tau,
            solver,
            reads,
            p0,
            p1,
            beta_min,
            beta_max,
            sweeps,
            max_iter,
            seed,
            json,
        } => cmd_select(
            &input,
            &SelectOptions {
                tau,
                solver,
                reads,
                qubo: QuboConfig {
                    centrality_weight: p0,
                    penalty_weight: p1,
                },
                beta_range: (beta_min, beta_max),
                sweeps,
                max_iter,
                seed,
                json,
            },
        ),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rinq=debug,rinq_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_graph(path: &Path) -> Result<Adjacency> {
    let start = Instant::now();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let adj = read_edge_list(file)
        .with_context(|| format!("Failed to load edge list {}", path.display()))?;
    tracing::info!(
        nodes = adj.len(),
        elapsed = ?start.elapsed(),
        "loaded {}",
        path.display()
    );
    Ok(adj)
}

fn cmd_stats(input: &Path) -> Result<()> {
    let adj = load_graph(input)?;
    let degrees = degree_vector(&adj);
    let min = degrees.iter().copied().fold(f64::INFINITY, f64::min);
    let max = degrees.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = degrees.sum() / adj.len() as f64;

    println!("Graph Statistics");
    println!("================");
    println!("Nodes:          {}", adj.len());
    println!("Edges:          {}", adj.edge_count());
    println!("Degree range:   {min:.2} .. {max:.2}");
    println!("Mean degree:    {mean:.2}");
    println!("Estrada index:  {:.4}", estrada_index(&adj));

    Ok(())
}

fn cmd_centrality(input: &Path, measure: Measure, terms: usize, top: usize) -> Result<()> {
    let adj = load_graph(input)?;

    let start = Instant::now();
    let (name, scores) = match measure {
        Measure::Eigenvector => (
            "eigenvector",
            eigenvector_centrality(&adj, EigenvectorConfig::default())
                .context("Eigenvector centrality failed")?,
        ),
        Measure::Estrada => (
            "Estrada",
            estrada_centrality_series(&adj, terms).context("Estrada series failed")?,
        ),
        Measure::Subgraph => ("subgraph", subgraph_centrality(&adj)),
    };
    println!("Computed {name} centrality in {:.2?}", start.elapsed());

    println!("Top {} nodes by {name} centrality:", top.min(adj.len()));
    for (rank, &i) in rank_nodes(&scores).iter().take(top).enumerate() {
        println!("{}. {} ({:.6})", rank + 1, adj.labels()[i], scores[i]);
    }

    Ok(())
}

fn cmd_select(input: &Path, opts: &SelectOptions) -> Result<()> {
    let adj = load_graph(input)?;
    let qubo = formulate(&adj, opts.tau, opts.qubo).context("Failed to formulate QUBO")?;

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("Annealing (tau={})...", opts.tau));
    let start = Instant::now();

    let outcome: SolveOutcome = match opts.solver {
        Solver::Continuous => {
            let defaults = ContinuousConfig::default();
            ContinuousAnnealer::new(ContinuousConfig {
                num_reads: opts.reads.unwrap_or(defaults.num_reads),
                max_iterations: opts.max_iter,
                seed: opts.seed,
                ..defaults
            })
            .solve(&qubo, opts.tau)
        }
        Solver::Discrete => {
            let defaults = SampleParams::default();
            DiscreteAnnealer::new(
                SimulatedAnnealingSampler::default(),
                SampleParams {
                    num_reads: opts.reads.unwrap_or(defaults.num_reads),
                    beta_range: opts.beta_range,
                    num_sweeps: opts.sweeps,
                    seed: opts.seed,
                },
            )
            .solve(&qubo, opts.tau)
        }
    }
    .context("Solver failed")?;

    pb.finish_and_clear();
    let elapsed = start.elapsed();

    if opts.json {
        let report = SelectReport {
            solver: opts.solver,
            tau: opts.tau,
            formulation: qubo.params(),
            selected: outcome
                .selection
                .as_ref()
                .map(|s| s.labels(&adj))
                .unwrap_or_default(),
            nodes: outcome
                .selection
                .as_ref()
                .map(|s| s.nodes.clone())
                .unwrap_or_default(),
            energy: outcome.selection.as_ref().map(|s| s.energy),
            feasible_reads: outcome.feasible_reads,
            total_reads: outcome.total_reads,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Solved in {elapsed:.2?}");
    match &outcome.selection {
        Some(selection) => {
            println!(
                "Selected {} nodes (energy {:.6}, {} of {} reads feasible):",
                selection.nodes.len(),
                selection.energy,
                outcome.feasible_reads,
                outcome.total_reads
            );
            for label in selection.labels(&adj) {
                println!("  {label}");
            }
        }
        None => {
            println!(
                "No feasible selection: none of {} reads selected exactly {} nodes",
                outcome.total_reads, opts.tau
            );
        }
    }

    Ok(())
}
