//! Collection types shared across the crate.
//!
//! Thin aliases over `rustc-hash` keep hashing fast for the small keys
//! used here (site indices, points, slotmap key pairs) while leaving the
//! hasher choice in one place.

use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

/// Index of a site in the input order.
///
/// Sites have no standalone record type; their identity is their position
/// in the input sequence, and their geometry lives on the owning
/// [`Face`](crate::core::diagram::Face).
pub type SiteIndex = usize;

/// Fast hash map used throughout the crate.
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Fast hash set used throughout the crate.
pub type FastHashSet<V> = FxHashSet<V>;

/// Creates a [`FastHashMap`] with the given capacity.
#[inline]
#[must_use]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, FxBuildHasher)
}

/// Creates a [`FastHashSet`] with the given capacity.
#[inline]
#[must_use]
pub fn fast_hash_set_with_capacity<V>(capacity: usize) -> FastHashSet<V> {
    FastHashSet::with_capacity_and_hasher(capacity, FxBuildHasher)
}
