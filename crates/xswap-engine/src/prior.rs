//! Edge priors estimated from degree-preserving permutations.

use std::collections::BTreeMap;
use std::mem;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use xswap_core::errors::{ErrorInfo, XswapError};
use xswap_core::{Edge, NodeBounds, NodeId};
use xswap_graph::{find_duplicate, AdjacencyMatrix};

use crate::config::PriorConfig;
use crate::engine::swap_edges;

/// Prior of one `(source_id, target_id)` cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorRecord {
    /// Row of the cell.
    pub source_id: NodeId,
    /// Column of the cell.
    pub target_id: NodeId,
    /// Whether the cell holds an edge of the unpermuted network.
    pub edge: bool,
    /// Number of edges in the cell's row.
    pub source_degree: u64,
    /// Number of edges in the cell's column.
    pub target_degree: u64,
    /// Fraction of permutations, pooled over cells of equal degrees, holding the edge.
    pub xswap_prior: f64,
}

/// Counts, for every cell, how many permutations contain that edge.
///
/// Permutation `i` is seeded with `initial_seed + i`. When antiparallel edges are not
/// allowed every permuted network is symmetrised before counting.
pub fn compute_occurrence_matrix(
    edges: &[Edge],
    config: &PriorConfig,
) -> Result<AdjacencyMatrix, XswapError> {
    if let Some(edge) = find_duplicate(edges) {
        return Err(XswapError::Duplicate(
            ErrorInfo::new("duplicate-input-edge", "edge list contains a repeated edge")
                .with_context("edge", edge)
                .with_hint("multigraphs are not supported"),
        ));
    }
    let bounds = NodeBounds::shared_from_edges(edges)?;
    let shape = resolve_shape(config, bounds)?;
    let num_swaps = config.num_swaps(edges.len())?;
    let add_reverse = !config.allow_antiparallel;

    let mut counter = AdjacencyMatrix::zeros(shape)?;
    for permutation in 0..config.n_permutations {
        let (permuted, stats) = swap_edges(
            edges.to_vec(),
            bounds,
            config.conditions(permutation),
            num_swaps,
            &config.index,
        )?;
        counter.accumulate(&AdjacencyMatrix::from_edges(&permuted, add_reverse, shape)?)?;
        debug!(permutation, accepted = stats.accepted, "permutation counted");
    }
    Ok(counter)
}

/// Computes the XSwap prior of every cell of the configured shape, in row-major order.
///
/// Cells sharing a `(source_degree, target_degree)` pair are pooled, so each cell's prior
/// rests on `n_permutations` times the size of its degree group.
pub fn compute_xswap_priors(
    edges: &[Edge],
    config: &PriorConfig,
) -> Result<Vec<PriorRecord>, XswapError> {
    if config.n_permutations == 0 {
        return Err(XswapError::Input(ErrorInfo::new(
            "zero-permutations",
            "at least one permutation is required to estimate priors",
        )));
    }
    let bounds = NodeBounds::shared_from_edges(edges)?;
    let shape = resolve_shape(config, bounds)?;
    let original = AdjacencyMatrix::from_edges(edges, !config.allow_antiparallel, shape)?;
    let source_degrees = original.row_sums();
    let target_degrees = original.col_sums();
    let occurrences = compute_occurrence_matrix(edges, config)?;

    let (rows, cols) = shape;
    let mut groups: BTreeMap<(u64, u64), (u64, u64)> = BTreeMap::new();
    for row in 0..rows {
        for col in 0..cols {
            let group = groups
                .entry((source_degrees[row], target_degrees[col]))
                .or_insert((0, 0));
            group.0 += u64::from(occurrences.get(row, col));
            group.1 += 1;
        }
    }

    let mut records = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let key = (source_degrees[row], target_degrees[col]);
            let (count, size) = groups.get(&key).copied().unwrap_or((0, 1));
            records.push(PriorRecord {
                source_id: row as NodeId,
                target_id: col as NodeId,
                edge: original.get(row, col) > 0,
                source_degree: key.0,
                target_degree: key.1,
                xswap_prior: count as f64 / (config.n_permutations * size) as f64,
            });
        }
    }
    info!(
        cells = records.len(),
        degree_groups = groups.len(),
        n_permutations = config.n_permutations,
        "computed xswap priors"
    );
    Ok(records)
}

/// Closed-form prior assuming a stationary swap chain:
/// `sd * td / (sd * td + m - sd - td + 1)`.
pub fn approximate_xswap_prior(source_degree: f64, target_degree: f64, num_edges: f64) -> f64 {
    let product = source_degree * target_degree;
    product / (product + num_edges - source_degree - target_degree + 1.0)
}

/// Dense matrices alive at once: the original, the running counter and one permutation.
const RESIDENT_MATRICES: u128 = 3;

fn resolve_shape(config: &PriorConfig, bounds: NodeBounds) -> Result<(usize, usize), XswapError> {
    let side = (bounds.max_source as usize).saturating_add(1);
    let shape = config.shape.unwrap_or((side, side));
    if shape.0 == 0 || shape.1 == 0 {
        return Err(XswapError::Input(
            ErrorInfo::new("empty-shape", "prior matrix shape must be non-zero")
                .with_context("rows", shape.0)
                .with_context("cols", shape.1),
        ));
    }
    let cells = AdjacencyMatrix::cell_count(shape)?;
    let required = cells as u128 * mem::size_of::<u32>() as u128 * RESIDENT_MATRICES;
    if required > u128::from(config.index.memory_budget) {
        return Err(XswapError::BudgetExceeded(
            ErrorInfo::new(
                "prior-budget",
                "prior matrices do not fit in the memory budget",
            )
            .with_context("rows", shape.0)
            .with_context("cols", shape.1)
            .with_context("required_bytes", required)
            .with_context("memory_budget", config.index.memory_budget)
            .with_hint("pass a smaller shape or remap node ids densely"),
        ));
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximation_matches_closed_form() {
        assert_eq!(approximate_xswap_prior(1.0, 1.0, 1.0), 1.0);
        assert!((approximate_xswap_prior(2.0, 3.0, 10.0) - 6.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn missing_shape_defaults_to_square() {
        let config = PriorConfig::default();
        assert_eq!(resolve_shape(&config, NodeBounds::shared(4)).unwrap(), (5, 5));
        let empty = PriorConfig {
            shape: Some((0, 3)),
            ..PriorConfig::default()
        };
        assert_eq!(
            resolve_shape(&empty, NodeBounds::shared(4)).unwrap_err().info().code,
            "empty-shape"
        );
    }
}
