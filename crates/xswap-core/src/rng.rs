//! Deterministic RNG wrapper.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic RNG handle used by every randomized XSwap operation.
///
/// The handle is a thin wrapper around `StdRng` seeded through `seed_from_u64`. Two
/// handles built from the same seed emit the same sequence on the same build; the
/// sequence is not pinned across `rand` releases.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a uniformly distributed index in `0..len`.
    ///
    /// `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
