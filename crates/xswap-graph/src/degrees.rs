use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xswap_core::{Edge, NodeId};

/// Out- and in-degree of every node appearing in an edge list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeSequence {
    /// Out-degree keyed by source node.
    pub out_degrees: BTreeMap<NodeId, usize>,
    /// In-degree keyed by target node.
    pub in_degrees: BTreeMap<NodeId, usize>,
}

impl DegreeSequence {
    /// Tallies the degrees of `edges`.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut sequence = Self::default();
        for edge in edges {
            *sequence.out_degrees.entry(edge.source).or_insert(0) += 1;
            *sequence.in_degrees.entry(edge.target).or_insert(0) += 1;
        }
        sequence
    }

    /// Out-degree of `node` (zero when it never appears as a source).
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_degrees.get(&node).copied().unwrap_or(0)
    }

    /// In-degree of `node` (zero when it never appears as a target).
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_degrees.get(&node).copied().unwrap_or(0)
    }
}

/// Returns the first repeated edge in `edges`, if any.
pub fn find_duplicate(edges: &[Edge]) -> Option<Edge> {
    let mut sorted = edges.to_vec();
    sorted.sort_unstable();
    sorted
        .windows(2)
        .find(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
}
