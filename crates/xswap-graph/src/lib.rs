#![deny(missing_docs)]

//! Edge codec, membership index and edge-list utilities for the XSwap engine.

/// Cantor pairing of ordered edges.
pub mod codec;
mod degrees;
mod formats;
mod hash;
pub mod index;
pub mod preprocessing;
mod serialization;

pub use codec::{bound as pairing_bound, encode as pairing_index, PairingIndex};
pub use degrees::{find_duplicate, DegreeSequence};
pub use formats::AdjacencyMatrix;
pub use hash::canonical_hash;
pub use index::{BackendChoice, BackendKind, EdgeSet, IndexConfig, MembershipIndex};
pub use preprocessing::{
    load_processed_edges, load_str_edges, map_str_edges, write_edges, write_mapping,
    MappedEdges,
};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{edges_from_bytes, edges_from_json, edges_to_bytes, edges_to_json};
