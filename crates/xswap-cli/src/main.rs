use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    map::{self, MapArgs},
    permute::{self, PermuteArgs},
    prior::{self, PriorArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "xswap", about = "Degree-preserving edge swap randomization")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Permute an integer edge list and write the result with its swap statistics.
    Permute(PermuteArgs),
    /// Estimate the XSwap prior of every node pair.
    Prior(PriorArgs),
    /// Map a string edge list onto integer identifiers.
    Map(MapArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Permute(args) => permute::run(&args),
        Command::Prior(args) => prior::run(&args),
        Command::Map(args) => map::run(&args),
    }
}
