use xswap_core::{Edge, NodeId};

/// Scalar key identifying an ordered edge inside the membership index.
///
/// Computed in 128-bit arithmetic so that every `u32 x u32` pair has a key.
pub type PairingIndex = u128;

/// Cantor pairing of `(source, target)`, offset by `target`.
///
/// `(s + t)(s + t + 1) / 2 + t` is strictly increasing in each argument, so the key of any
/// edge inside `[0, max_source] x [0, max_target]` is at most [`bound`] of those maxima.
pub fn encode(edge: Edge) -> PairingIndex {
    pair(edge.source, edge.target)
}

/// Largest key any edge within the declared maxima can take.
pub fn bound(max_source: NodeId, max_target: NodeId) -> PairingIndex {
    pair(max_source, max_target)
}

fn pair(source: NodeId, target: NodeId) -> PairingIndex {
    let source = u128::from(source);
    let target = u128::from(target);
    let sum = source + target;
    sum * (sum + 1) / 2 + target
}
