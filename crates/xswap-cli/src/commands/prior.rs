use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::info;
use xswap_engine::{compute_xswap_priors, PriorConfig};
use xswap_graph::load_processed_edges;

#[derive(Args, Debug)]
pub struct PriorArgs {
    /// Comma separated edge list of integer node identifiers, one edge per row.
    #[arg(long)]
    pub edges: PathBuf,
    /// YAML prior configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for `priors.csv`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &PriorArgs) -> Result<(), Box<dyn Error>> {
    let config = PriorConfig::load(&args.config)?;
    let edges = load_processed_edges(&args.edges)?;
    let records = compute_xswap_priors(&edges, &config)?;

    fs::create_dir_all(&args.out)?;
    let path = args.out.join("priors.csv");
    let mut writer = csv::Writer::from_path(&path)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(cells = records.len(), path = %path.display(), "priors written");
    Ok(())
}
