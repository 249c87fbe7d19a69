use rustc_hash::FxHashSet;

use super::EdgeSet;
use crate::codec::PairingIndex;

/// Hash set of pairing indices with no pre-allocated bound.
#[derive(Debug, Clone, Default)]
pub struct HashedSet {
    keys: FxHashSet<PairingIndex>,
}

impl HashedSet {
    /// Creates a set sized for `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut keys = FxHashSet::default();
        keys.reserve(capacity);
        Self { keys }
    }
}

impl EdgeSet for HashedSet {
    fn contains(&self, key: PairingIndex) -> bool {
        self.keys.contains(&key)
    }

    fn insert(&mut self, key: PairingIndex) -> bool {
        self.keys.insert(key)
    }

    fn remove(&mut self, key: PairingIndex) -> bool {
        self.keys.remove(&key)
    }

    fn len(&self) -> u64 {
        self.keys.len() as u64
    }
}
