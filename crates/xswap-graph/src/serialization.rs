use serde::{Deserialize, Serialize};
use xswap_core::errors::{ErrorInfo, XswapError};
use xswap_core::{Edge, NodeId};

/// Serializes the edge list to a compact binary representation using `bincode`.
pub fn edges_to_bytes(edges: &[Edge]) -> Result<Vec<u8>, XswapError> {
    let serializable = SerializableEdges::from_edges(edges);
    bincode::serialize(&serializable)
        .map_err(|err| XswapError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores an edge list from its binary representation.
pub fn edges_from_bytes(bytes: &[u8]) -> Result<Vec<Edge>, XswapError> {
    let serializable: SerializableEdges = bincode::deserialize(bytes)
        .map_err(|err| XswapError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    Ok(serializable.into_edges())
}

/// Serializes the edge list to a JSON array of `[source, target]` pairs.
pub fn edges_to_json(edges: &[Edge]) -> Result<String, XswapError> {
    let serializable = SerializableEdges::from_edges(edges);
    serde_json::to_string(&serializable)
        .map_err(|err| XswapError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores an edge list from a JSON array of `[source, target]` pairs.
pub fn edges_from_json(json: &str) -> Result<Vec<Edge>, XswapError> {
    let serializable: SerializableEdges = serde_json::from_str(json)
        .map_err(|err| XswapError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    Ok(serializable.into_edges())
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
struct SerializableEdges {
    pairs: Vec<(NodeId, NodeId)>,
}

impl SerializableEdges {
    fn from_edges(edges: &[Edge]) -> Self {
        Self {
            pairs: edges.iter().copied().map(Into::into).collect(),
        }
    }

    fn into_edges(self) -> Vec<Edge> {
        self.pairs.into_iter().map(Edge::from).collect()
    }
}
