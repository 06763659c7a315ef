//! Deterministic FNV-1a hashing
//!
//! Hash dictionaries and memo tables are keyed with this hasher so their
//! iteration order is identical from run to run.

use core::hash::{BuildHasherDefault, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hasher
#[derive(Debug, Clone, Copy)]
pub struct FnvHasher(u64);

impl Default for FnvHasher {
    fn default() -> Self {
        Self(FNV_OFFSET_BASIS)
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= byte as u64;
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Build hasher for hashbrown maps
pub type FnvBuildHasher = BuildHasherDefault<FnvHasher>;

/// Hash a single coordinate pair
pub fn hash_position(row: usize, col: usize) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(&(row as u64).to_le_bytes());
    hasher.write(&(col as u64).to_le_bytes());
    hasher.finish()
}
