//! # fieldtype CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// fieldtype: value type inference for dataset filters.
///
/// Classifies raw values into array, object, boolean, number, string or
/// date, and lists the filterable fields of JSON datasets.
#[derive(Parser, Debug)]
#[command(name = "fieldtype", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Classify raw values.
    Classify(fieldtype_cli::classify::ClassifyArgs),
    /// List the fields of a JSON dataset with their tags.
    Inspect(fieldtype_cli::inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Classify(args) => fieldtype_cli::classify::run(&args, &mut out),
        Commands::Inspect(args) => fieldtype_cli::inspect::run(&args, &mut out),
    }
}
