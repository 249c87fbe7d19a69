use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use xswap_core::errors::{ErrorInfo, XswapError};
use xswap_core::Edge;
use xswap_graph::canonical_hash;

use crate::config::PermuteConfig;
use crate::stats::SwapStats;

/// Record of a completed permutation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configuration used for the run.
    pub config: PermuteConfig,
    /// Number of edges permuted.
    pub num_edges: usize,
    /// Swap attempts requested.
    pub num_swaps: u64,
    /// Canonical hash of the input edge list.
    pub input_hash: String,
    /// Canonical hash of the permuted edge list.
    pub output_hash: String,
    /// Counters reported by the run.
    pub stats: SwapStats,
}

impl RunManifest {
    /// Describes a run from its inputs and outputs.
    pub fn new(config: &PermuteConfig, input: &[Edge], output: &[Edge], stats: SwapStats) -> Self {
        Self {
            config: config.clone(),
            num_edges: input.len(),
            num_swaps: stats.swap_attempts,
            input_hash: canonical_hash(input),
            output_hash: canonical_hash(output),
            stats,
        }
    }

    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), XswapError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                XswapError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            XswapError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            XswapError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, XswapError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            XswapError::Serde(
                ErrorInfo::new("manifest-read", err.to_string()).with_context("path", path.display()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            XswapError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string()).with_context("path", path.display()),
            )
        })
    }
}
