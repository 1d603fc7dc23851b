mod alphabet;
mod map;
mod set;

pub use alphabet::{Alphabet, DEFAULT_MAX_ALPHABET_LEN, TrieError};
pub use map::TrieMap;
pub use set::TrieSet;
