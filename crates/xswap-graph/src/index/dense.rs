use super::EdgeSet;
use crate::codec::PairingIndex;

/// Uncompressed bitset with one bit per possible pairing index.
///
/// Bit `i` lives in byte `i / 8` at position `i % 8`, most significant bit first.
#[derive(Debug, Clone)]
pub struct DenseBitset {
    bytes: Vec<u8>,
    len: u64,
}

impl DenseBitset {
    /// Allocates a zeroed bitset of `num_bytes` bytes.
    pub fn with_bytes(num_bytes: usize) -> Self {
        Self {
            bytes: vec![0u8; num_bytes],
            len: 0,
        }
    }

    fn locate(key: PairingIndex) -> (usize, u8) {
        let byte = (key / 8) as usize;
        let mask = 0x80u8 >> (key % 8) as u32;
        (byte, mask)
    }
}

impl EdgeSet for DenseBitset {
    fn contains(&self, key: PairingIndex) -> bool {
        let (byte, mask) = Self::locate(key);
        self.bytes[byte] & mask != 0
    }

    fn insert(&mut self, key: PairingIndex) -> bool {
        let (byte, mask) = Self::locate(key);
        let word = &mut self.bytes[byte];
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.len += 1;
        true
    }

    fn remove(&mut self, key: PairingIndex) -> bool {
        let (byte, mask) = Self::locate(key);
        let word = &mut self.bytes[byte];
        if *word & mask == 0 {
            return false;
        }
        *word &= !mask;
        self.len -= 1;
        true
    }

    fn len(&self) -> u64 {
        self.len
    }
}
