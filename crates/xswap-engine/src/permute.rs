use tracing::debug;
use xswap_core::errors::XswapError;
use xswap_core::{Edge, NodeBounds};

use crate::config::PermuteConfig;
use crate::engine::swap_edges;
use crate::stats::SwapStats;

/// Permutes a copy of `edges` while preserving every node's in- and out-degree.
///
/// Node bounds are the largest source and target found in `edges`, and the number of
/// attempts is `floor(multiplier * edges.len())`. The caller's slice is left untouched.
pub fn permute_edge_list(
    edges: &[Edge],
    config: &PermuteConfig,
) -> Result<(Vec<Edge>, SwapStats), XswapError> {
    let bounds = NodeBounds::from_edges(edges)?;
    let num_swaps = config.num_swaps(edges.len())?;
    debug!(
        max_source = bounds.max_source,
        max_target = bounds.max_target,
        num_swaps,
        "permuting edge list"
    );
    swap_edges(
        edges.to_vec(),
        bounds,
        config.conditions(),
        num_swaps,
        &config.index,
    )
}
