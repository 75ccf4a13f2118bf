use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pf_graph::{
    Artifact, Graph, GraphError, GraphOptions, GraphVisitor, Node, OptionsError,
    StableNamePolicy,
};
use tracing_subscriber::EnvFilter;

mod wordcount;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PipeForge CLI - build and inspect dataflow pipeline graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the word-count demo and print its forward-topological traversal
    Plan(GraphArgs),
    /// Build the word-count demo and list every fully-qualified node name
    Names(GraphArgs),
}

#[derive(Args)]
struct GraphArgs {
    /// YAML or JSON file with graph options
    #[arg(long)]
    options: Option<PathBuf>,
    /// Stable-naming policy (ignore, warn, fail); overrides the options file
    #[arg(long)]
    stable_names: Option<StableNamePolicy>,
    /// Number of default-named sources to read
    #[arg(long, default_value_t = 1)]
    reads: usize,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Options error: {0}")]
    Options(#[from] OptionsError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan(args) => cmd_plan(&args),
        Commands::Names(args) => cmd_names(&args),
    }
}

fn build_graph(args: &GraphArgs) -> CliResult<Graph> {
    let mut options = match &args.options {
        Some(path) => GraphOptions::from_path(path)?,
        None => GraphOptions::default(),
    };
    if let Some(policy) = args.stable_names {
        options.stable_unique_names = policy;
    }

    tracing::debug!(reads = args.reads, policy = %options.stable_unique_names, "building demo pipeline");
    let mut graph = Graph::new(options);
    wordcount::build(&mut graph, args.reads)?;
    Ok(graph)
}

fn cmd_plan(args: &GraphArgs) -> CliResult<()> {
    let mut graph = build_graph(args)?;
    let mut printer = TreePrinter::default();
    graph.traverse(&mut printer)?;
    println!("✓ {} transforms, {} artifacts", graph.nodes().count(), graph.artifacts().len());
    Ok(())
}

fn cmd_names(args: &GraphArgs) -> CliResult<()> {
    let graph = build_graph(args)?;
    for node in graph.nodes() {
        let kind = if node.is_composite() { "composite" } else { "primitive" };
        println!("  {} ({kind})", node.full_name());
    }
    Ok(())
}

/// Prints the traversal as an indented tree.
#[derive(Default)]
struct TreePrinter {
    depth: usize,
}

impl TreePrinter {
    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

impl GraphVisitor for TreePrinter {
    fn enter_composite(&mut self, node: &Node) {
        println!("{}+ {}", self.indent(), node.full_name());
        self.depth += 1;
    }

    fn leave_composite(&mut self, _node: &Node) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn visit_primitive(&mut self, node: &Node) {
        println!("{}- {}", self.indent(), node.full_name());
    }

    fn visit_artifact(&mut self, artifact: &Artifact, producer: Option<&Node>) {
        match producer {
            Some(p) => println!(
                "{}  ~ {} (from {})",
                self.indent(),
                artifact.display_name(),
                p.full_name()
            ),
            None => println!("{}  ~ {} (root input)", self.indent(), artifact.display_name()),
        }
    }
}
