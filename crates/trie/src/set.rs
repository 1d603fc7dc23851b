use crate::alphabet::{Alphabet, TrieError};
use crate::map::TrieMap;

/// R-way trie set, a thin wrapper over [`TrieMap`] with unit values.
pub struct TrieSet {
    map: TrieMap<()>,
}

impl TrieSet {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            map: TrieMap::new(alphabet),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.map.alphabet()
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

    /// Adds `key`, returning the new element count.
    pub fn insert(&mut self, key: &str) -> Result<usize, TrieError> {
        self.map.insert(key, ())
    }

    /// Removes `key`, reporting whether it was present.
    pub fn remove(&mut self, key: &str) -> Result<bool, TrieError> {
        Ok(self.map.remove(key)?.is_some())
    }

    pub fn contains(&self, key: &str) -> Result<bool, TrieError> {
        self.map.contains(key)
    }

    pub fn longest_prefix_of<'k>(&self, key: &'k str) -> Result<&'k str, TrieError> {
        self.map.longest_prefix_of(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.map.keys()
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, TrieError> {
        self.map.keys_with_prefix(prefix)
    }

    pub fn keys_matching(&self, pattern: &str, wildcard: char) -> Result<Vec<String>, TrieError> {
        self.map.keys_matching(pattern, wildcard)
    }
}
