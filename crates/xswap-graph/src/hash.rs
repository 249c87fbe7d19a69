use sha2::{Digest, Sha256};
use xswap_core::Edge;

/// Computes the canonical hash of an ordered edge list.
///
/// Positions are part of the identity: the swap engine mutates edges in place, so two
/// lists holding the same edges in a different order hash differently.
pub fn canonical_hash(edges: &[Edge]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"xswap-edges:v1");
    hasher.update((edges.len() as u64).to_le_bytes());
    for edge in edges {
        hasher.update(edge.source.to_le_bytes());
        hasher.update(edge.target.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
