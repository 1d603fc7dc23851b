use crate::alphabet::{Alphabet, TrieError};

type Link<V> = Option<Box<TrieNode<V>>>;

struct TrieNode<V> {
    next: Box<[Link<V>]>,
    value: Option<V>,
}

impl<V> TrieNode<V> {
    fn boxed(fanout: usize) -> Box<Self> {
        let mut next = Vec::with_capacity(fanout);
        next.resize_with(fanout, || None);
        Box::new(Self {
            next: next.into_boxed_slice(),
            value: None,
        })
    }

    fn is_hollow(&self) -> bool {
        self.value.is_none() && self.next.iter().all(|c| c.is_none())
    }
}

/// R-way trie map over string keys.
///
/// - Every key character must belong to the per-instance [`Alphabet`];
///   keys are validated in full before any mutation, so a failed call
///   leaves the trie untouched.
/// - Prefix and wildcard collection walk with an explicit work stack,
///   so deep tries never exhaust the call stack; results come back in
///   alphabet-index order.
pub struct TrieMap<V> {
    alphabet: Alphabet,
    root: Link<V>,
    len: usize,
}

impl<V> TrieMap<V> {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            root: None,
            len: 0,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.len;
        self.root = None;
        self.len = 0;
        removed
    }

    /// Inserts `key` or overwrites its value, returning the new
    /// element count.
    pub fn insert(&mut self, key: &str, value: V) -> Result<usize, TrieError> {
        let path = self.encode_key(key)?;
        let fanout = self.alphabet.len();
        let mut node = self.root.get_or_insert_with(|| TrieNode::boxed(fanout));
        for ci in path {
            node = node.next[ci].get_or_insert_with(|| TrieNode::boxed(fanout));
        }
        if node.value.replace(value).is_none() {
            self.len += 1;
        }
        Ok(self.len)
    }

    pub fn get(&self, key: &str) -> Result<Option<&V>, TrieError> {
        let path = self.encode_key(key)?;
        let mut node = match self.root.as_deref() {
            Some(root) => root,
            None => return Ok(None),
        };
        for ci in path {
            match node.next[ci].as_deref() {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(node.value.as_ref())
    }

    pub fn contains(&self, key: &str) -> Result<bool, TrieError> {
        Ok(self.get(key)?.is_some())
    }

    /// Removes `key` and returns its value; empty subtries are pruned.
    pub fn remove(&mut self, key: &str) -> Result<Option<V>, TrieError> {
        let path = self.encode_key(key)?;
        let Some(root) = self.root.take() else {
            return Ok(None);
        };
        let (root, removed) = Self::remove_node(root, &path);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Longest prefix of `key` that is itself a key of the trie; the
    /// empty string when there is none.
    pub fn longest_prefix_of<'k>(&self, key: &'k str) -> Result<&'k str, TrieError> {
        if key.is_empty() {
            return Err(TrieError::EmptyKey);
        }

        let mut node = match self.root.as_deref() {
            Some(root) => root,
            None => return Ok(""),
        };
        let mut best = 0usize;
        for (pos, c) in key.char_indices() {
            if node.value.is_some() {
                best = pos;
            }
            let ci = self.alphabet.index_of(c)?;
            match node.next[ci].as_deref() {
                Some(child) => node = child,
                None => return Ok(&key[..best]),
            }
        }
        if node.value.is_some() {
            best = key.len();
        }
        Ok(&key[..best])
    }

    pub fn entries(&self) -> Vec<(String, &V)> {
        let mut out = Vec::new();
        if let Some(root) = self.root.as_deref() {
            self.collect(root, String::new(), &mut out);
        }
        out
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.entries().into_iter().map(|(_, v)| v).collect()
    }

    pub fn to_vec(&self) -> Vec<&V> {
        self.values()
    }

    /// Entries whose keys start with `prefix`, in alphabet-index
    /// order. An empty prefix collects the whole trie.
    pub fn entries_with_prefix(&self, prefix: &str) -> Result<Vec<(String, &V)>, TrieError> {
        let path = self.encode_prefix(prefix)?;
        let mut out = Vec::new();
        let Some(mut node) = self.root.as_deref() else {
            return Ok(out);
        };
        for ci in path {
            match node.next[ci].as_deref() {
                Some(child) => node = child,
                None => return Ok(out),
            }
        }
        self.collect(node, prefix.to_owned(), &mut out);
        Ok(out)
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, TrieError> {
        Ok(self
            .entries_with_prefix(prefix)?
            .into_iter()
            .map(|(k, _)| k)
            .collect())
    }

    pub fn values_with_prefix(&self, prefix: &str) -> Result<Vec<&V>, TrieError> {
        Ok(self
            .entries_with_prefix(prefix)?
            .into_iter()
            .map(|(_, v)| v)
            .collect())
    }

    pub fn to_vec_with_prefix(&self, prefix: &str) -> Result<Vec<&V>, TrieError> {
        self.values_with_prefix(prefix)
    }

    /// Entries whose keys match `pattern`, where `wildcard` stands for
    /// any single alphabet character. The wildcard must not itself be
    /// an alphabet member.
    pub fn entries_matching(
        &self,
        pattern: &str,
        wildcard: char,
    ) -> Result<Vec<(String, &V)>, TrieError> {
        let pattern = self.encode_pattern(pattern, wildcard)?;
        let mut out = Vec::new();
        let Some(root) = self.root.as_deref() else {
            return Ok(out);
        };
        self.collect_matching(root, &pattern, &mut out);
        Ok(out)
    }

    pub fn keys_matching(&self, pattern: &str, wildcard: char) -> Result<Vec<String>, TrieError> {
        Ok(self
            .entries_matching(pattern, wildcard)?
            .into_iter()
            .map(|(k, _)| k)
            .collect())
    }

    pub fn values_matching(&self, pattern: &str, wildcard: char) -> Result<Vec<&V>, TrieError> {
        Ok(self
            .entries_matching(pattern, wildcard)?
            .into_iter()
            .map(|(_, v)| v)
            .collect())
    }

    pub fn to_vec_matching(&self, pattern: &str, wildcard: char) -> Result<Vec<&V>, TrieError> {
        self.values_matching(pattern, wildcard)
    }

    fn encode_key(&self, key: &str) -> Result<Vec<usize>, TrieError> {
        if key.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        self.encode_prefix(key)
    }

    fn encode_prefix(&self, prefix: &str) -> Result<Vec<usize>, TrieError> {
        prefix.chars().map(|c| self.alphabet.index_of(c)).collect()
    }

    fn encode_pattern(&self, pattern: &str, wildcard: char) -> Result<Vec<Option<usize>>, TrieError> {
        if self.alphabet.contains(wildcard) {
            return Err(TrieError::BadWildcard);
        }
        pattern
            .chars()
            .map(|c| {
                if c == wildcard {
                    Ok(None)
                } else {
                    self.alphabet.index_of(c).map(Some)
                }
            })
            .collect()
    }

    fn remove_node(mut node: Box<TrieNode<V>>, path: &[usize]) -> (Link<V>, Option<V>) {
        let removed = match path.split_first() {
            None => node.value.take(),
            Some((&ci, rest)) => match node.next[ci].take() {
                Some(child) => {
                    let (child, removed) = Self::remove_node(child, rest);
                    node.next[ci] = child;
                    removed
                }
                None => None,
            },
        };

        if node.is_hollow() {
            (None, removed)
        } else {
            (Some(node), removed)
        }
    }

    // Pre-order walk in alphabet-index order; frames carry the next
    // child slot to try, and each non-start frame owns one pushed
    // character of `key`.
    fn collect<'a>(&self, start: &'a TrieNode<V>, prefix: String, out: &mut Vec<(String, &'a V)>) {
        let fanout = self.alphabet.len();
        let mut key = prefix;
        if let Some(v) = &start.value {
            out.push((key.clone(), v));
        }

        let mut stack: Vec<(&'a TrieNode<V>, usize)> = vec![(start, 0)];
        while !stack.is_empty() {
            let depth = stack.len() - 1;
            let (node, ci) = stack[depth];
            if ci == fanout {
                stack.pop();
                if !stack.is_empty() {
                    key.pop();
                }
                continue;
            }
            stack[depth].1 += 1;
            if let Some(child) = node.next[ci].as_deref() {
                key.push(self.alphabet.char_at(ci));
                if let Some(v) = &child.value {
                    out.push((key.clone(), v));
                }
                stack.push((child, 0));
            }
        }
    }

    fn collect_matching<'a>(
        &self,
        root: &'a TrieNode<V>,
        pattern: &[Option<usize>],
        out: &mut Vec<(String, &'a V)>,
    ) {
        let fanout = self.alphabet.len();
        let mut key = String::new();
        let mut stack: Vec<(&'a TrieNode<V>, usize)> = vec![(root, 0)];

        while !stack.is_empty() {
            let depth = stack.len() - 1;
            let (node, ci) = stack[depth];
            if depth == pattern.len() {
                // Whole pattern consumed at this node.
                if let Some(v) = &node.value {
                    out.push((key.clone(), v));
                }
                stack.pop();
                if !stack.is_empty() {
                    key.pop();
                }
                continue;
            }

            let candidate = match pattern[depth] {
                Some(exact) => {
                    if ci == 0 {
                        stack[depth].1 = fanout;
                        Some(exact)
                    } else {
                        None
                    }
                }
                None => {
                    let found = (ci..fanout).find(|&j| node.next[j].is_some());
                    stack[depth].1 = found.map_or(fanout, |j| j + 1);
                    found
                }
            };

            match candidate.and_then(|j| node.next[j].as_deref().map(|child| (j, child))) {
                Some((j, child)) => {
                    key.push(self.alphabet.char_at(j));
                    stack.push((child, 0));
                }
                None => {
                    stack.pop();
                    if !stack.is_empty() {
                        key.pop();
                    }
                }
            }
        }
    }
}
