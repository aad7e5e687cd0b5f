use std::hash::{BuildHasher, BuildHasherDefault, Hash};

use zwohash::ZwoHasher;

/// Computes the hash of a value using the crate's default hasher.
#[inline]
pub(crate) fn hash_value<T: Hash>(value: T) -> u64 {
    <BuildHasherDefault<ZwoHasher>>::default().hash_one(value)
}
