use crate::iter::Keys;
use crate::map::LlrbTreeMap;

/// Left-leaning red-black tree set.
///
/// Key-only façade over the same balancing core as [`LlrbTreeMap`],
/// instantiated with a unit payload.
pub struct LlrbTreeSet<K: Ord> {
    map: LlrbTreeMap<K, ()>,
}

impl<K: Ord> Default for LlrbTreeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> LlrbTreeSet<K> {
    pub fn new() -> Self {
        Self {
            map: LlrbTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every key and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        self.map.clear()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains(key)
    }

    /// Inserts `key`, returning the new element count. Inserting a
    /// present key is a no-op.
    pub fn insert(&mut self, key: K) -> usize {
        self.map.insert(key, ())
    }

    /// Removes `key`; true iff it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.map.remove(key).is_some()
    }

    pub fn remove_min(&mut self) -> Option<K> {
        self.map.remove_min().map(|(k, ())| k)
    }

    pub fn remove_max(&mut self) -> Option<K> {
        self.map.remove_max().map(|(k, ())| k)
    }

    pub fn min(&self) -> Option<&K> {
        self.map.min().map(|(k, _)| k)
    }

    pub fn max(&self) -> Option<&K> {
        self.map.max().map(|(k, _)| k)
    }

    /// Largest key `<= key`.
    pub fn floor(&self, key: &K) -> Option<&K> {
        self.map.floor(key).map(|(k, _)| k)
    }

    /// Smallest key `>= key`.
    pub fn ceil(&self, key: &K) -> Option<&K> {
        self.map.ceil(key).map(|(k, _)| k)
    }

    /// The `(rank + 1)`-th smallest key; `None` when `rank >= len()`.
    pub fn select(&self, rank: usize) -> Option<&K> {
        self.map.select(rank).map(|(k, _)| k)
    }

    /// Number of keys strictly less than `key`.
    pub fn rank(&self, key: &K) -> usize {
        self.map.rank(key)
    }

    /// Number of keys in the inclusive range `[from, to]`; 0 when
    /// `from > to`.
    pub fn range_len(&self, from: &K, to: &K) -> usize {
        self.map.range_len(from, to)
    }

    /// Longest root-to-null path; -1 for an empty set. O(n).
    pub fn height(&self) -> isize {
        self.map.height()
    }

    /// Lazy ascending iteration over keys.
    pub fn iter(&self) -> SetIter<'_, K> {
        SetIter {
            inner: self.map.keys(),
        }
    }

    /// Ascending iteration over keys in `[from, to]` inclusive; empty
    /// when `from > to`.
    pub fn range(&self, from: K, to: K) -> SetIter<'_, K> {
        SetIter {
            inner: self.map.keys_in_range(from, to),
        }
    }

    pub fn to_vec(&self) -> Vec<&K> {
        self.iter().collect()
    }

    pub fn to_vec_in_range(&self, from: K, to: K) -> Vec<&K> {
        self.range(from, to).collect()
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.map.assert_invariants();
    }
}

pub struct SetIter<'a, K: Ord> {
    inner: Keys<'a, K, ()>,
}

impl<'a, K: Ord> Iterator for SetIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, K: Ord> IntoIterator for &'a LlrbTreeSet<K> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
