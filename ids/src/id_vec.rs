//! [`Vec`] wrapper with [`Id`] indexing.
use core::{
    fmt::{self, Debug},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::Id;

/// A vector that maps `K` keys to `V` values.
///
/// It has entries `(k, v)` with `v` being the item at position [`k.id_index()`][Id::id_index] of
/// the wrapped vector. This means the keys always span a contiguous range of ids starting at the
/// id with index `0`.
pub struct IdVec<K, V> {
    _phantom: PhantomData<K>,
    values: Vec<V>,
}

impl<K: Id, V: Clone> Clone for IdVec<K, V> {
    fn clone(&self) -> Self {
        Self {
            _phantom: PhantomData,
            values: self.values.clone(),
        }
    }
}

impl<K: Id, V> Default for IdVec<K, V> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
            values: Vec::new(),
        }
    }
}

impl<K: Id, V> IdVec<K, V> {
    /// Creates an empty `IdVec`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing vector.
    ///
    /// # Panics
    ///
    /// Panics when `K` cannot index the full length of the vector.
    pub fn from_vec(values: Vec<V>) -> Self {
        assert!(values.len() <= K::MAX_ID_INDEX.saturating_add(1));
        Self {
            _phantom: PhantomData,
            values,
        }
    }

    /// Returns the wrapped vector.
    pub fn into_vec(self) -> Vec<V> {
        self.values
    }

    /// Returns the number of entries in the collection.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the collection has no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the key that the next [`push`][Self::push] would use.
    ///
    /// # Panics
    ///
    /// Panics when `K` cannot represent the key.
    #[inline]
    pub fn next_unused_key(&self) -> K {
        K::from_id_index(self.values.len())
    }

    /// Appends a value, returning its key.
    #[inline]
    pub fn push(&mut self, value: V) -> K {
        let key = self.next_unused_key();
        self.values.push(value);
        key
    }

    /// Returns a reference to the value for a key, or `None` if the key is out of range.
    #[inline(always)]
    pub fn get(&self, key: K) -> Option<&V> {
        self.values.get(key.id_index())
    }

    /// Returns a mutable reference to the value for a key, or `None` if the key is out of range.
    #[inline(always)]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.values.get_mut(key.id_index())
    }

    /// Resizes the collection, filling new entries with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: V)
    where
        V: Clone,
    {
        assert!(new_len <= K::MAX_ID_INDEX.saturating_add(1));
        self.values.resize(new_len, value)
    }

    /// Grows the collection so that `key` is in range, filling new entries with `value`.
    pub fn grow_for_key(&mut self, key: K, value: V)
    where
        V: Clone,
    {
        let needed = key.id_index() + 1;
        if self.values.len() < needed {
            self.values.resize(needed, value)
        }
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.values.clear()
    }

    /// Returns the values as a slice.
    #[inline(always)]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Returns the values as a mutable slice.
    #[inline(always)]
    pub fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    /// Returns an iterator over all keys.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator {
        (0..self.values.len()).map(K::from_id_index)
    }

    /// Returns an iterator over all entries using value references.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (K, &V)> + ExactSizeIterator {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (K::from_id_index(index), value))
    }

    /// Returns an iterator over all entries using mutable value references.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (K, &mut V)> + ExactSizeIterator {
        self.values
            .iter_mut()
            .enumerate()
            .map(|(index, value)| (K::from_id_index(index), value))
    }
}

impl<K: Id, V> Index<K> for IdVec<K, V> {
    type Output = V;

    #[inline(always)]
    #[track_caller]
    fn index(&self, index: K) -> &Self::Output {
        &self.values[index.id_index()]
    }
}

impl<K: Id, V> IndexMut<K> for IdVec<K, V> {
    #[inline(always)]
    #[track_caller]
    fn index_mut(&mut self, index: K) -> &mut Self::Output {
        &mut self.values[index.id_index()]
    }
}

impl<K: Id, V> FromIterator<V> for IdVec<K, V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<K: Id, V: Debug> Debug for IdVec<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Id, V: PartialEq> PartialEq for IdVec<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K: Id, V: Eq> Eq for IdVec<K, V> {}
