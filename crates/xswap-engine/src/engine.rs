use tracing::{debug, info};
use xswap_core::errors::{ErrorInfo, XswapError};
use xswap_core::{Edge, NodeBounds, RngHandle};
use xswap_graph::{IndexConfig, MembershipIndex};

use crate::config::Conditions;
use crate::stats::{Rejection, SwapOutcome, SwapStats};

/// Randomized double-edge-swap loop over an owned edge collection.
///
/// The engine keeps the collection and its [`MembershipIndex`] in lockstep: after every
/// attempt, accepted or not, the index holds exactly the edges of the collection.
#[derive(Debug)]
pub struct SwapEngine {
    edges: Vec<Edge>,
    index: MembershipIndex,
    conditions: Conditions,
    stats: SwapStats,
    rng: RngHandle,
}

impl SwapEngine {
    /// Builds the engine and seeds its index with `edges`.
    ///
    /// Fails with [`XswapError::Input`] on an empty collection and with the index errors
    /// for duplicate or out-of-range edges.
    pub fn new(
        edges: Vec<Edge>,
        bounds: NodeBounds,
        conditions: Conditions,
        index_config: &IndexConfig,
    ) -> Result<Self, XswapError> {
        if edges.is_empty() {
            return Err(XswapError::Input(
                ErrorInfo::new("empty-edges", "cannot swap an empty edge list")
                    .with_hint("provide at least one edge"),
            ));
        }
        let index = MembershipIndex::from_edges(&edges, bounds, index_config)?;
        let rng = RngHandle::from_seed(conditions.seed);
        Ok(Self {
            edges,
            index,
            conditions,
            stats: SwapStats::default(),
            rng,
        })
    }

    /// Current edge collection.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SwapStats {
        &self.stats
    }

    /// Membership index mirroring the collection.
    pub fn index(&self) -> &MembershipIndex {
        &self.index
    }

    /// Conditions the engine was built with.
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Performs one swap attempt.
    pub fn attempt(&mut self) -> Result<SwapOutcome, XswapError> {
        let outcome = self.try_swap()?;
        self.stats.record(outcome);
        Ok(outcome)
    }

    /// Performs `num_swaps` attempts.
    pub fn run(&mut self, num_swaps: u64) -> Result<(), XswapError> {
        debug!(
            num_swaps,
            edges = self.edges.len(),
            seed = self.conditions.seed,
            backend = %self.index.kind(),
            "starting swap run"
        );
        for _ in 0..num_swaps {
            self.attempt()?;
        }
        info!(
            swap_attempts = self.stats.swap_attempts,
            accepted = self.stats.accepted,
            same_edge = self.stats.same_edge,
            self_loop = self.stats.self_loop,
            duplicate = self.stats.duplicate,
            undir_duplicate = self.stats.undir_duplicate,
            excluded = self.stats.excluded,
            "swap run finished"
        );
        Ok(())
    }

    /// Hands back the collection and the counters.
    pub fn finish(self) -> (Vec<Edge>, SwapStats) {
        (self.edges, self.stats)
    }

    fn try_swap(&mut self) -> Result<SwapOutcome, XswapError> {
        let len = self.edges.len();
        let a = self.rng.index(len);
        let b = self.rng.index(len);
        if a == b {
            return Ok(SwapOutcome::Rejected(Rejection::SameEdge));
        }

        let old_a = self.edges[a];
        let old_b = self.edges[b];
        let new_a = Edge::new(old_a.source, old_b.target);
        let new_b = Edge::new(old_b.source, old_a.target);

        for candidate in [new_a, new_b] {
            if let Some(rejection) = self.violation(candidate)? {
                return Ok(SwapOutcome::Rejected(rejection));
            }
        }

        self.index.remove(old_a)?;
        self.index.remove(old_b)?;
        self.edges[a].target = old_b.target;
        self.edges[b].target = old_a.target;
        self.index.add(new_a)?;
        self.index.add(new_b)?;
        Ok(SwapOutcome::Accepted)
    }

    fn violation(&self, candidate: Edge) -> Result<Option<Rejection>, XswapError> {
        if !self.conditions.allow_self_loop && candidate.is_self_loop() {
            return Ok(Some(Rejection::SelfLoop));
        }
        if self.index.contains(candidate)? {
            return Ok(Some(Rejection::Duplicate));
        }
        if !self.conditions.allow_antiparallel {
            let reverse = candidate.reversed();
            // With separate source/target maxima the reverse may fall outside the domain,
            // in which case it cannot be present.
            if self.index.in_domain(&reverse) && self.index.contains(reverse)? {
                return Ok(Some(Rejection::UndirDuplicate));
            }
        }
        if self.conditions.excluded_edges.contains(&candidate) {
            return Ok(Some(Rejection::Excluded));
        }
        Ok(None)
    }
}

/// Runs `num_swaps` attempts over `edges` and returns the rewired list with its counters.
pub fn swap_edges(
    edges: Vec<Edge>,
    bounds: NodeBounds,
    conditions: Conditions,
    num_swaps: u64,
    index_config: &IndexConfig,
) -> Result<(Vec<Edge>, SwapStats), XswapError> {
    let mut engine = SwapEngine::new(edges, bounds, conditions, index_config)?;
    engine.run(num_swaps)?;
    Ok(engine.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xswap_core::edges_from_pairs;

    #[test]
    fn single_edge_only_draws_same_position() {
        let edges = edges_from_pairs(&[(0, 1)]);
        let (result, stats) = swap_edges(
            edges.clone(),
            NodeBounds::shared(1),
            Conditions::default(),
            25,
            &IndexConfig::default(),
        )
        .unwrap();
        assert_eq!(result, edges);
        assert_eq!(stats.same_edge, 25);
        assert!(stats.is_conserved());
    }

    #[test]
    fn index_tracks_collection() {
        let edges = edges_from_pairs(&[(0, 5), (1, 6), (2, 7), (3, 8), (4, 9)]);
        let mut engine = SwapEngine::new(
            edges,
            NodeBounds::shared(9),
            Conditions {
                seed: 3,
                ..Conditions::default()
            },
            &IndexConfig::default(),
        )
        .unwrap();
        engine.run(200).unwrap();
        assert_eq!(engine.index().len(), 5);
        for edge in engine.edges() {
            assert!(engine.index().contains(*edge).unwrap());
        }
    }
}
