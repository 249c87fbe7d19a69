#![deny(missing_docs)]

//! Degree-preserving double-edge-swap randomization and XSwap edge priors.

/// YAML configuration schema and swap conditions.
pub mod config;
/// Swap loop over an edge collection and its membership index.
pub mod engine;
/// Run manifest serialization helpers.
pub mod manifest;
mod permute;
pub mod prior;
/// Attempt counters and rejection reasons.
pub mod stats;

pub use config::{Conditions, PermuteConfig, PriorConfig};
pub use engine::{swap_edges, SwapEngine};
pub use manifest::RunManifest;
pub use permute::permute_edge_list;
pub use prior::{
    approximate_xswap_prior, compute_occurrence_matrix, compute_xswap_priors, PriorRecord,
};
pub use stats::{Rejection, SwapOutcome, SwapStats};
