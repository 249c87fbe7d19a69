//! Edge membership index with size-dependent storage.
//!
//! The backend is picked once when the index is built, from the pairing bound of the
//! declared node domain and the configured memory budget:
//!
//! 1. [`DenseBitset`] when `ceil((bound + 1) / 8)` bytes fit in the budget,
//! 2. [`CompressedBitmap`] when the bound fits in 64 bits,
//! 3. [`HashedSet`] otherwise.
//!
//! Sparse backends are additionally checked against a coarse per-edge estimate so that
//! construction fails with [`XswapError::BudgetExceeded`] instead of allocating past the
//! budget.

mod compressed;
mod dense;
mod hashed;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use xswap_core::errors::{ErrorInfo, XswapError};
use xswap_core::{Edge, NodeBounds};

use crate::codec::{self, PairingIndex};

pub use compressed::CompressedBitmap;
pub use dense::DenseBitset;
pub use hashed::HashedSet;

/// Default memory budget for the dense backend, in bytes.
pub const DEFAULT_MEMORY_BUDGET: u64 = 4_000_000_000;

/// Upper estimate of roaring bytes per stored edge (one container per edge in the worst case).
pub const COMPRESSED_BYTES_PER_EDGE: u64 = 40;

/// Upper estimate of hash set bytes per stored edge (key, control byte, load factor slack).
pub const HASHED_BYTES_PER_EDGE: u64 = 48;

/// Capability shared by the storage backends.
///
/// Keys are range-checked by [`MembershipIndex`] before they reach a backend.
pub trait EdgeSet {
    /// Returns whether `key` is present.
    fn contains(&self, key: PairingIndex) -> bool;

    /// Inserts `key`, returning `false` when it was already present.
    fn insert(&mut self, key: PairingIndex) -> bool;

    /// Removes `key`, returning `false` when it was absent.
    fn remove(&mut self, key: PairingIndex) -> bool;

    /// Number of stored keys.
    fn len(&self) -> u64;

    /// Returns whether no key is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Backend requested by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendChoice {
    /// Pick by domain size and memory budget.
    #[default]
    Auto,
    /// Always use the dense bitset.
    Dense,
    /// Always use the roaring bitmap.
    Compressed,
    /// Always use the hash set.
    Hashed,
}

/// Backend actually selected for an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// [`DenseBitset`].
    Dense,
    /// [`CompressedBitmap`].
    Compressed,
    /// [`HashedSet`].
    Hashed,
}

impl BackendKind {
    /// Stable label used in logs and manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Dense => "dense-bitset",
            BackendKind::Compressed => "compressed-bitmap",
            BackendKind::Hashed => "hash-set",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for building a [`MembershipIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Memory budget in bytes for the index storage.
    #[serde(default = "default_memory_budget")]
    pub memory_budget: u64,
    /// Backend override; `auto` selects by size.
    #[serde(default)]
    pub backend: BackendChoice,
}

fn default_memory_budget() -> u64 {
    DEFAULT_MEMORY_BUDGET
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            memory_budget: default_memory_budget(),
            backend: BackendChoice::Auto,
        }
    }
}

/// Number of bytes a dense bitset needs to cover keys `0..=bound`.
pub fn dense_bytes(bound: PairingIndex) -> PairingIndex {
    bound / 8 + 1
}

#[derive(Debug, Clone)]
enum Backend {
    Dense(DenseBitset),
    Compressed(CompressedBitmap),
    Hashed(HashedSet),
}

impl Backend {
    fn kind(&self) -> BackendKind {
        match self {
            Backend::Dense(_) => BackendKind::Dense,
            Backend::Compressed(_) => BackendKind::Compressed,
            Backend::Hashed(_) => BackendKind::Hashed,
        }
    }
}

impl EdgeSet for Backend {
    fn contains(&self, key: PairingIndex) -> bool {
        match self {
            Backend::Dense(set) => set.contains(key),
            Backend::Compressed(set) => set.contains(key),
            Backend::Hashed(set) => set.contains(key),
        }
    }

    fn insert(&mut self, key: PairingIndex) -> bool {
        match self {
            Backend::Dense(set) => set.insert(key),
            Backend::Compressed(set) => set.insert(key),
            Backend::Hashed(set) => set.insert(key),
        }
    }

    fn remove(&mut self, key: PairingIndex) -> bool {
        match self {
            Backend::Dense(set) => set.remove(key),
            Backend::Compressed(set) => set.remove(key),
            Backend::Hashed(set) => set.remove(key),
        }
    }

    fn len(&self) -> u64 {
        match self {
            Backend::Dense(set) => set.len(),
            Backend::Compressed(set) => set.len(),
            Backend::Hashed(set) => set.len(),
        }
    }
}

/// Set of edges keyed by their pairing index.
///
/// Every operation rejects edges outside the declared [`NodeBounds`] with
/// [`XswapError::OutOfRange`]; adding a present edge is [`XswapError::Duplicate`] and
/// removing an absent one is [`XswapError::NotFound`].
#[derive(Debug, Clone)]
pub struct MembershipIndex {
    bounds: NodeBounds,
    bound: PairingIndex,
    backend: Backend,
}

impl MembershipIndex {
    /// Creates an empty index for the declared domain.
    pub fn new(bounds: NodeBounds, config: &IndexConfig) -> Result<Self, XswapError> {
        Self::with_capacity(bounds, 0, config)
    }

    /// Creates an empty index expected to hold about `expected_edges` edges.
    pub fn with_capacity(
        bounds: NodeBounds,
        expected_edges: usize,
        config: &IndexConfig,
    ) -> Result<Self, XswapError> {
        let bound = codec::bound(bounds.max_source, bounds.max_target);
        let backend = select_backend(bound, expected_edges as u64, config)?;
        info!(
            backend = %backend.kind(),
            bound = %bound,
            max_source = bounds.max_source,
            max_target = bounds.max_target,
            "selected membership backend"
        );
        Ok(Self {
            bounds,
            bound,
            backend,
        })
    }

    /// Creates an index holding every edge of `edges`.
    ///
    /// Fails with [`XswapError::Duplicate`] on the first repeated edge and with
    /// [`XswapError::OutOfRange`] on the first edge outside `bounds`.
    pub fn from_edges(
        edges: &[Edge],
        bounds: NodeBounds,
        config: &IndexConfig,
    ) -> Result<Self, XswapError> {
        let mut index = Self::with_capacity(bounds, edges.len(), config)?;
        for (position, edge) in edges.iter().enumerate() {
            index.add(*edge).map_err(|err| with_position(err, position))?;
        }
        debug!(edges = edges.len(), "membership index populated");
        Ok(index)
    }

    /// Backend selected at construction.
    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Declared node bounds.
    pub fn bounds(&self) -> NodeBounds {
        self.bounds
    }

    /// Largest pairing index accepted by the index.
    pub fn bound(&self) -> PairingIndex {
        self.bound
    }

    /// Number of edges currently present.
    pub fn len(&self) -> u64 {
        self.backend.len()
    }

    /// Returns whether the index holds no edge.
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Returns whether `edge` lies inside the declared domain.
    pub fn in_domain(&self, edge: &Edge) -> bool {
        self.bounds.contains(edge)
    }

    /// Returns whether `edge` is present.
    pub fn contains(&self, edge: Edge) -> Result<bool, XswapError> {
        let key = self.key(edge)?;
        Ok(self.backend.contains(key))
    }

    /// Marks `edge` as present.
    pub fn add(&mut self, edge: Edge) -> Result<(), XswapError> {
        let key = self.key(edge)?;
        if !self.backend.insert(key) {
            return Err(XswapError::Duplicate(
                ErrorInfo::new("duplicate-edge", "edge is already present in the index")
                    .with_context("edge", edge)
                    .with_context("pairing_index", key)
                    .with_hint("the edge list must not contain parallel edges"),
            ));
        }
        Ok(())
    }

    /// Marks `edge` as absent.
    pub fn remove(&mut self, edge: Edge) -> Result<(), XswapError> {
        let key = self.key(edge)?;
        if !self.backend.remove(key) {
            return Err(XswapError::NotFound(
                ErrorInfo::new("missing-edge", "edge is not present in the index")
                    .with_context("edge", edge)
                    .with_context("pairing_index", key),
            ));
        }
        Ok(())
    }

    fn key(&self, edge: Edge) -> Result<PairingIndex, XswapError> {
        let key = codec::encode(edge);
        if !self.bounds.contains(&edge) || key > self.bound {
            return Err(XswapError::OutOfRange(
                ErrorInfo::new("out-of-range", "edge lies outside the declared node bounds")
                    .with_context("edge", edge)
                    .with_context("pairing_index", key)
                    .with_context("bound", self.bound)
                    .with_context("max_source", self.bounds.max_source)
                    .with_context("max_target", self.bounds.max_target),
            ));
        }
        Ok(key)
    }
}

fn select_backend(
    bound: PairingIndex,
    expected_edges: u64,
    config: &IndexConfig,
) -> Result<Backend, XswapError> {
    let budget = config.memory_budget;
    let dense = dense_bytes(bound);
    let dense_fits = dense <= PairingIndex::from(budget) && usize::try_from(dense).is_ok();
    let kind = match config.backend {
        BackendChoice::Auto if dense_fits => BackendKind::Dense,
        BackendChoice::Auto if bound <= PairingIndex::from(u64::MAX) => BackendKind::Compressed,
        BackendChoice::Auto => BackendKind::Hashed,
        BackendChoice::Dense => BackendKind::Dense,
        BackendChoice::Compressed => BackendKind::Compressed,
        BackendChoice::Hashed => BackendKind::Hashed,
    };
    match kind {
        BackendKind::Dense => {
            if !dense_fits {
                return Err(budget_exceeded(
                    "dense-budget",
                    "dense bitset does not fit in the memory budget",
                    dense,
                    budget,
                ));
            }
            debug!(bytes = %dense, "allocating dense bitset");
            Ok(Backend::Dense(DenseBitset::with_bytes(dense as usize)))
        }
        BackendKind::Compressed => {
            if bound > PairingIndex::from(u64::MAX) {
                return Err(XswapError::BudgetExceeded(
                    ErrorInfo::new(
                        "compressed-domain",
                        "pairing bound exceeds the 64-bit domain of the compressed bitmap",
                    )
                    .with_context("bound", bound)
                    .with_hint("use the hashed backend for very large identifiers"),
                ));
            }
            let estimate = expected_edges.saturating_mul(COMPRESSED_BYTES_PER_EDGE);
            if estimate > budget {
                return Err(budget_exceeded(
                    "compressed-budget",
                    "compressed bitmap estimate does not fit in the memory budget",
                    PairingIndex::from(estimate),
                    budget,
                ));
            }
            Ok(Backend::Compressed(CompressedBitmap::new()))
        }
        BackendKind::Hashed => {
            let estimate = expected_edges.saturating_mul(HASHED_BYTES_PER_EDGE);
            if estimate > budget {
                return Err(budget_exceeded(
                    "hashed-budget",
                    "hash set estimate does not fit in the memory budget",
                    PairingIndex::from(estimate),
                    budget,
                ));
            }
            Ok(Backend::Hashed(HashedSet::with_capacity(expected_edges as usize)))
        }
    }
}

fn budget_exceeded(code: &str, message: &str, required: PairingIndex, budget: u64) -> XswapError {
    XswapError::BudgetExceeded(
        ErrorInfo::new(code, message)
            .with_context("required_bytes", required)
            .with_context("memory_budget", budget),
    )
}

fn with_position(err: XswapError, position: usize) -> XswapError {
    let tag = |info: ErrorInfo| info.with_context("position", position);
    match err {
        XswapError::OutOfRange(info) => XswapError::OutOfRange(tag(info)),
        XswapError::Duplicate(info) => XswapError::Duplicate(tag(info)),
        XswapError::NotFound(info) => XswapError::NotFound(tag(info)),
        other => other,
    }
}
