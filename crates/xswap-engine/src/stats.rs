use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason a swap attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Both draws picked the same position.
    SameEdge,
    /// A new edge would be a self-loop.
    SelfLoop,
    /// A new edge already exists.
    Duplicate,
    /// The reverse of a new edge already exists.
    UndirDuplicate,
    /// A new edge is on the exclusion list.
    Excluded,
}

impl Rejection {
    /// Counter name under which the rejection is reported.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::SameEdge => "same_edge",
            Rejection::SelfLoop => "self_loop",
            Rejection::Duplicate => "duplicate",
            Rejection::UndirDuplicate => "undir_duplicate",
            Rejection::Excluded => "excluded",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one swap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// Both edges were rewired.
    Accepted,
    /// Nothing changed.
    Rejected(Rejection),
}

/// Counters accumulated over one run.
///
/// Every attempt increments `swap_attempts` and exactly one of the other counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapStats {
    /// Attempts made.
    pub swap_attempts: u64,
    /// Attempts that drew the same position twice.
    pub same_edge: u64,
    /// Attempts rejected for creating a self-loop.
    pub self_loop: u64,
    /// Attempts rejected for creating an existing edge.
    pub duplicate: u64,
    /// Attempts rejected for creating the reverse of an existing edge.
    pub undir_duplicate: u64,
    /// Attempts rejected for creating an excluded edge.
    pub excluded: u64,
    /// Attempts that were committed.
    pub accepted: u64,
}

impl SwapStats {
    pub(crate) fn record(&mut self, outcome: SwapOutcome) {
        self.swap_attempts += 1;
        let counter = match outcome {
            SwapOutcome::Accepted => &mut self.accepted,
            SwapOutcome::Rejected(Rejection::SameEdge) => &mut self.same_edge,
            SwapOutcome::Rejected(Rejection::SelfLoop) => &mut self.self_loop,
            SwapOutcome::Rejected(Rejection::Duplicate) => &mut self.duplicate,
            SwapOutcome::Rejected(Rejection::UndirDuplicate) => &mut self.undir_duplicate,
            SwapOutcome::Rejected(Rejection::Excluded) => &mut self.excluded,
        };
        *counter += 1;
    }

    /// Attempts that did not change the graph.
    pub fn rejected(&self) -> u64 {
        self.same_edge + self.self_loop + self.duplicate + self.undir_duplicate + self.excluded
    }

    /// Returns whether every attempt is accounted for by exactly one outcome.
    pub fn is_conserved(&self) -> bool {
        self.rejected() + self.accepted == self.swap_attempts
    }

    /// Fraction of attempts that were committed, or zero without attempts.
    pub fn acceptance_rate(&self) -> f64 {
        if self.swap_attempts == 0 {
            0.0
        } else {
            self.accepted as f64 / self.swap_attempts as f64
        }
    }

    /// Named counters, in the layout reported by the command line tool.
    pub fn counters(&self) -> BTreeMap<&'static str, u64> {
        BTreeMap::from([
            ("swap_attempts", self.swap_attempts),
            ("same_edge", self.same_edge),
            ("self_loop", self.self_loop),
            ("duplicate", self.duplicate),
            ("undir_duplicate", self.undir_duplicate),
            ("excluded", self.excluded),
            ("accepted", self.accepted),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_outcome_lands_in_one_counter() {
        let mut stats = SwapStats::default();
        stats.record(SwapOutcome::Accepted);
        stats.record(SwapOutcome::Rejected(Rejection::SameEdge));
        stats.record(SwapOutcome::Rejected(Rejection::Excluded));
        stats.record(SwapOutcome::Rejected(Rejection::Excluded));
        assert_eq!(stats.swap_attempts, 4);
        assert_eq!(stats.excluded, 2);
        assert_eq!(stats.rejected(), 3);
        assert!(stats.is_conserved());
        assert_eq!(stats.acceptance_rate(), 0.25);
        assert_eq!(stats.counters()["same_edge"], 1);
    }
}
