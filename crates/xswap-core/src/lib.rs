#![deny(missing_docs)]
#![doc = "Core data types for the XSwap engine: edges, node bounds, errors and the seeded RNG."]

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, XswapError};
pub use rng::RngHandle;
pub use types::NodeBounds;

/// Raw node identifier. Source and target roles may use separate identifier spaces.
pub type NodeId = u32;

/// Ordered `(source, target)` pair.
///
/// An edge is distinct from its reverse; undirected handling is layered on top by the
/// swap conditions rather than by folding the pair here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Edge {
    /// Source endpoint.
    pub source: NodeId,
    /// Target endpoint.
    pub target: NodeId,
}

impl Edge {
    /// Creates a new edge from its endpoints.
    pub const fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Returns the antiparallel counterpart `(target, source)`.
    pub const fn reversed(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    /// Returns whether both endpoints are the same node.
    pub const fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((source, target): (NodeId, NodeId)) -> Self {
        Self::new(source, target)
    }
}

impl From<Edge> for (NodeId, NodeId) {
    fn from(edge: Edge) -> Self {
        (edge.source, edge.target)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.target)
    }
}

/// Converts a slice of raw tuples into edges.
pub fn edges_from_pairs(pairs: &[(NodeId, NodeId)]) -> Vec<Edge> {
    pairs.iter().copied().map(Edge::from).collect()
}
