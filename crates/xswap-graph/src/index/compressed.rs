use roaring::RoaringTreemap;

use super::EdgeSet;
use crate::codec::PairingIndex;

/// Roaring bitmap over 64-bit pairing indices.
///
/// Slower than [`DenseBitset`](super::DenseBitset) but its memory follows the number of
/// stored edges rather than the size of the identifier domain.
#[derive(Debug, Clone, Default)]
pub struct CompressedBitmap {
    bitmap: RoaringTreemap,
}

impl CompressedBitmap {
    /// Creates an empty bitmap.
    pub fn new() -> Self {
        Self::default()
    }
}

// Keys handed to this backend never exceed `u64::MAX`; the index only selects it for
// bounds inside the 64-bit domain.
impl EdgeSet for CompressedBitmap {
    fn contains(&self, key: PairingIndex) -> bool {
        self.bitmap.contains(key as u64)
    }

    fn insert(&mut self, key: PairingIndex) -> bool {
        self.bitmap.insert(key as u64)
    }

    fn remove(&mut self, key: PairingIndex) -> bool {
        self.bitmap.remove(key as u64)
    }

    fn len(&self) -> u64 {
        self.bitmap.len()
    }
}
