use std::collections::HashMap;

use thiserror::Error;

/// Default cap on the fan-out of a trie node.
pub const DEFAULT_MAX_ALPHABET_LEN: usize = 128;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("duplicate character {0:?} in alphabet")]
    DuplicateChar(char),
    #[error("alphabet length {len} is greater than maximum {max}")]
    AlphabetTooLong { len: usize, max: usize },
    #[error("key is empty")]
    EmptyKey,
    #[error("character {0:?} is not in the alphabet")]
    CharNotInAlphabet(char),
    #[error("wildcard must not be a member of the alphabet")]
    BadWildcard,
}

/// Character-to-index table configured per trie instance.
///
/// The maximum length is a constructor parameter, not a process-wide
/// mutable setting, so independent tries (and tests) cannot interfere
/// with each other.
#[derive(Clone, Debug)]
pub struct Alphabet {
    index: HashMap<char, usize>,
    chars: Vec<char>,
}

impl Alphabet {
    pub fn new(chars: &str) -> Result<Self, TrieError> {
        Self::with_max_len(chars, DEFAULT_MAX_ALPHABET_LEN)
    }

    pub fn with_max_len(chars: &str, max: usize) -> Result<Self, TrieError> {
        if chars.is_empty() {
            return Err(TrieError::EmptyAlphabet);
        }

        let mut index = HashMap::new();
        let mut ordered = Vec::new();
        for c in chars.chars() {
            if index.insert(c, ordered.len()).is_some() {
                return Err(TrieError::DuplicateChar(c));
            }
            ordered.push(c);
        }

        if ordered.len() > max {
            return Err(TrieError::AlphabetTooLong {
                len: ordered.len(),
                max,
            });
        }

        Ok(Self {
            index,
            chars: ordered,
        })
    }

    /// Fan-out of a trie node built over this alphabet.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    pub(crate) fn index_of(&self, c: char) -> Result<usize, TrieError> {
        self.index
            .get(&c)
            .copied()
            .ok_or(TrieError::CharNotInAlphabet(c))
    }

    pub(crate) fn char_at(&self, index: usize) -> char {
        self.chars[index]
    }
}
