use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, XswapError};
use crate::{Edge, NodeId};

/// Largest identifier allowed for each endpoint role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeBounds {
    /// Maximum source identifier (inclusive).
    pub max_source: NodeId,
    /// Maximum target identifier (inclusive).
    pub max_target: NodeId,
}

impl NodeBounds {
    /// Creates bounds with separate source and target maxima.
    pub const fn new(max_source: NodeId, max_target: NodeId) -> Self {
        Self {
            max_source,
            max_target,
        }
    }

    /// Creates bounds for a graph with a single identifier space.
    pub const fn shared(max_id: NodeId) -> Self {
        Self::new(max_id, max_id)
    }

    /// Derives per-role bounds from the largest source and target in `edges`.
    pub fn from_edges(edges: &[Edge]) -> Result<Self, XswapError> {
        let max_source = edges.iter().map(|edge| edge.source).max();
        let max_target = edges.iter().map(|edge| edge.target).max();
        match (max_source, max_target) {
            (Some(max_source), Some(max_target)) => Ok(Self::new(max_source, max_target)),
            _ => Err(empty_edges()),
        }
    }

    /// Derives a shared bound from the largest endpoint in `edges`.
    pub fn shared_from_edges(edges: &[Edge]) -> Result<Self, XswapError> {
        edges
            .iter()
            .map(|edge| edge.source.max(edge.target))
            .max()
            .map(Self::shared)
            .ok_or_else(empty_edges)
    }

    /// Returns whether both endpoints of `edge` fall inside the bounds.
    pub const fn contains(&self, edge: &Edge) -> bool {
        edge.source <= self.max_source && edge.target <= self.max_target
    }
}

fn empty_edges() -> XswapError {
    XswapError::Input(ErrorInfo::new(
        "empty-edges",
        "cannot derive node bounds from an empty edge list",
    ))
}
