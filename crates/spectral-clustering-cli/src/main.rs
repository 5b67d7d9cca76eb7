//! CLI driver for the spectral clustering core.
//!
//! Subcommands:
//!  - `run`: the full pipeline (ε-matrix → eigendecomposition → k-means),
//!    writing a cluster-assignment CSV. This is the reimplementation of the
//!    original 6-argument `main.C` driver.
//!  - `epsilon-matrix`: builds only the ε-neighbourhood matrix and writes it
//!    as a plain-text matrix file. This is the reimplementation of the
//!    original 5-argument `similarity_calc.C` driver.
//!
//! Design goals, matching the library crate:
//!  - Small, testable, clearly documented CLI surface.
//!  - Use the core crate (`spectral_clustering`) for all numerical work; this
//!    binary only parses arguments, reads/writes files, and reports timing.
//!  - Prefer `anyhow::Result` for application-level error handling so a
//!    failure anywhere in the pipeline surfaces as exit code 1.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use spectral_clustering::{epsilon, pipeline, DenseMatrix, Graph};

mod io;
mod logging;

use crate::io::{InputKind, ParsedGraph};

/// CLI entrypoint.
#[derive(Parser)]
#[command(
    name = "spectral-clustering-cli",
    about = "Spectral clustering driver — epsilon-neighbourhood graphs, Jacobi eigendecomposition, k-means",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write a cluster-assignment CSV.
    Run(RunArgs),
    /// Build only the epsilon-neighbourhood matrix and write it to a file.
    EpsilonMatrix(EpsilonMatrixArgs),
}

/// Arguments shared by both subcommands for describing the input graph.
#[derive(Args, Debug)]
struct GraphArgs {
    /// Shape of the input file: a dense NxN matrix, or a per-node
    /// neighbour list. Replaces the original driver's inverted
    /// `is_sim_matrix` integer flag with an explicit, non-inverted name.
    #[arg(long, value_enum, default_value_t = InputKind::Matrix)]
    input_kind: InputKind,

    /// Number of nodes in the graph.
    #[arg(long)]
    num_nodes: usize,

    /// Path to the input file.
    #[arg(long)]
    input: PathBuf,

    /// Distance/hop budget bounding BFS from each source node. Accepted as
    /// an integer on the command line and used as `f64` internally.
    #[arg(long)]
    epsilon: i64,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    graph: GraphArgs,

    /// Number of clusters to produce.
    #[arg(long)]
    num_clusters: usize,

    /// Path to write the cluster-assignment CSV to.
    #[arg(long)]
    output: PathBuf,

    /// Log k-means iteration progress.
    #[arg(long)]
    verbose: bool,
}

/// Arguments for the `epsilon-matrix` subcommand.
#[derive(Args, Debug)]
struct EpsilonMatrixArgs {
    #[command(flatten)]
    graph: GraphArgs,

    /// Path to write the epsilon-matrix to.
    #[arg(long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_pipeline(args),
        Commands::EpsilonMatrix(args) => run_epsilon_matrix(args),
    }
}

fn parsed_graph_as_ref(parsed: &ParsedGraph) -> Graph<'_> {
    match parsed {
        ParsedGraph::Matrix(m) => Graph::WeightedAdjacency(m),
        ParsedGraph::AdjacencyList(list) => Graph::AdjacencyList(list),
    }
}

fn run_pipeline(args: RunArgs) -> Result<()> {
    let start = Instant::now();
    let parsed = io::read_graph(&args.graph.input, args.graph.input_kind, args.graph.num_nodes)?;
    tracing::info!(elapsed = ?start.elapsed(), "parsed input graph");

    let graph = parsed_graph_as_ref(&parsed);
    let stage_start = Instant::now();
    let result = pipeline::run(
        &graph,
        args.graph.epsilon as f64,
        args.num_clusters,
        args.verbose,
    )?;
    tracing::info!(elapsed = ?stage_start.elapsed(), "computed clusters");

    io::write_cluster_csv(&args.output, &result.points, &result.clusters.membership)?;
    tracing::info!(elapsed = ?start.elapsed(), output = %args.output.display(), "wrote cluster assignments");
    Ok(())
}

fn run_epsilon_matrix(args: EpsilonMatrixArgs) -> Result<()> {
    let start = Instant::now();
    let parsed = io::read_graph(&args.graph.input, args.graph.input_kind, args.graph.num_nodes)?;
    tracing::info!(elapsed = ?start.elapsed(), "parsed input graph");

    let graph = parsed_graph_as_ref(&parsed);
    let mut sim = DenseMatrix::construct(args.graph.num_nodes, args.graph.num_nodes);
    epsilon::build(&graph, &mut sim, args.graph.epsilon as f64)?;
    tracing::info!(elapsed = ?start.elapsed(), "built epsilon-neighbourhood matrix");

    io::write_matrix(&args.output, &sim)?;
    tracing::info!(output = %args.output.display(), "wrote epsilon matrix");
    Ok(())
}
