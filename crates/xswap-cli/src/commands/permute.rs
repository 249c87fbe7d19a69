use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::info;
use xswap_engine::{permute_edge_list, PermuteConfig, RunManifest};
use xswap_graph::{load_processed_edges, write_edges};

#[derive(Args, Debug)]
pub struct PermuteArgs {
    /// Comma separated edge list of integer node identifiers, one edge per row.
    #[arg(long)]
    pub edges: PathBuf,
    /// YAML configuration; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seed overriding the configured one.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output directory for `edges.csv`, `stats.json` and `manifest.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &PermuteArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => PermuteConfig::load(path)?,
        None => PermuteConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let edges = load_processed_edges(&args.edges)?;
    let (permuted, stats) = permute_edge_list(&edges, &config)?;

    fs::create_dir_all(&args.out)?;
    write_edges(&args.out.join("edges.csv"), &permuted)?;
    fs::write(
        args.out.join("stats.json"),
        serde_json::to_string_pretty(&stats.counters())?,
    )?;
    RunManifest::new(&config, &edges, &permuted, stats).write(&args.out.join("manifest.json"))?;

    info!(
        edges = edges.len(),
        accepted = stats.accepted,
        out = %args.out.display(),
        "permutation written"
    );
    Ok(())
}
