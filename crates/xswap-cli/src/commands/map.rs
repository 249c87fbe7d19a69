use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::info;
use xswap_graph::{load_str_edges, map_str_edges, write_edges, write_mapping};

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Delimited edge list of arbitrary node names, one edge per row.
    #[arg(long)]
    pub edges: PathBuf,
    /// Field delimiter of the input file.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
    /// Give sources and targets separate identifier spaces.
    #[arg(long)]
    pub bipartite: bool,
    /// Output directory for `edges.csv`, `source_mapping.csv` and `target_mapping.csv`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &MapArgs) -> Result<(), Box<dyn Error>> {
    let delimiter = u8::try_from(args.delimiter)
        .map_err(|_| format!("delimiter {:?} is not a single byte", args.delimiter))?;
    let str_edges = load_str_edges(&args.edges, delimiter)?;
    let mapped = map_str_edges(&str_edges, args.bipartite);

    fs::create_dir_all(&args.out)?;
    write_edges(&args.out.join("edges.csv"), &mapped.edges)?;
    write_mapping(&args.out.join("source_mapping.csv"), &mapped.source_mapping)?;
    write_mapping(&args.out.join("target_mapping.csv"), &mapped.target_mapping)?;

    info!(
        edges = mapped.edges.len(),
        sources = mapped.source_mapping.len(),
        targets = mapped.target_mapping.len(),
        "mapped string edges"
    );
    Ok(())
}
