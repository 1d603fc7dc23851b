use std::cmp::Ordering;

use crate::iter::{Iter, Keys, Values};

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) red: bool,
    // Subtree node count, including this node. Caps capacity at
    // u32::MAX nodes, same class as the source structure.
    pub(crate) size: u32,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            red: true,
            size: 1,
            left: None,
            right: None,
        }
    }
}

/// Left-leaning red-black tree map with order statistics.
///
/// - Keys are unique; `insert` on an existing key overwrites in place.
/// - `select`/`rank`/`range_len` run in O(log n) via maintained
///   subtree sizes.
/// - Iteration is explicit-stack (no native recursion) and resumable;
///   range iteration is bounded inclusively on both ends.
pub struct LlrbTreeMap<K: Ord, V> {
    root: Link<K, V>,
}

impl<K: Ord, V> Default for LlrbTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> LlrbTreeMap<K, V> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn len(&self) -> usize {
        Self::size_of(&self.root) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every entry and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.len();
        Self::drop_tree(self.root.take());
        removed
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key` or overwrites its value, returning the new
    /// element count. Overwriting does not change the count.
    pub fn insert(&mut self, key: K, value: V) -> usize {
        let mut root = Self::insert_node(self.root.take(), key, value);
        root.red = false;
        self.root = Some(root);
        self.len()
    }

    /// Removes `key` and returns its value, or `None` if absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let root = self.root.take()?;
        let root = Self::spend_red(root);
        let (root, removed) = Self::remove_node(Some(root), key);
        self.root = root;
        if let Some(r) = self.root.as_deref_mut() {
            r.red = false;
        }
        removed
    }

    /// Removes and returns the smallest entry, or `None` on an empty
    /// tree.
    pub fn remove_min(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let root = Self::spend_red(root);
        let (root, min) = Self::delete_min_node(root);
        self.root = root;
        if let Some(r) = self.root.as_deref_mut() {
            r.red = false;
        }
        Some((min.key, min.value))
    }

    /// Removes and returns the largest entry, or `None` on an empty
    /// tree.
    pub fn remove_max(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let root = Self::spend_red(root);
        let (root, max) = Self::delete_max_node(root);
        self.root = root;
        if let Some(r) = self.root.as_deref_mut() {
            r.red = false;
        }
        Some((max.key, max.value))
    }

    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Largest entry with key `<= key`.
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        Self::floor_node(self.root.as_deref(), key).map(|n| (&n.key, &n.value))
    }

    /// Smallest entry with key `>= key`.
    pub fn ceil(&self, key: &K) -> Option<(&K, &V)> {
        Self::ceil_node(self.root.as_deref(), key).map(|n| (&n.key, &n.value))
    }

    /// The `(rank + 1)`-th smallest entry; `None` when
    /// `rank >= len()`. The smallest key has rank 0.
    pub fn select(&self, rank: usize) -> Option<(&K, &V)> {
        if rank >= self.len() {
            return None;
        }
        let node = Self::select_node(self.root.as_deref()?, rank as u32);
        Some((&node.key, &node.value))
    }

    /// Number of keys strictly less than `key`.
    pub fn rank(&self, key: &K) -> usize {
        Self::rank_node(self.root.as_deref(), key) as usize
    }

    /// Number of keys in the inclusive range `[from, to]`; 0 when
    /// `from > to`.
    pub fn range_len(&self, from: &K, to: &K) -> usize {
        if from > to {
            return 0;
        }
        let spread = self.rank(to) - self.rank(from);
        if self.contains(to) { spread + 1 } else { spread }
    }

    /// Longest root-to-null path; -1 for an empty tree. O(n), for
    /// diagnostics only.
    pub fn height(&self) -> isize {
        Self::height_node(self.root.as_deref())
    }

    /// Lazy ascending iteration over entries. A fresh call starts a
    /// fresh traversal.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), None, None)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Ascending iteration over entries with keys in `[from, to]`
    /// inclusive; empty when `from > to`.
    pub fn range(&self, from: K, to: K) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), Some(from), Some(to))
    }

    pub fn keys_in_range(&self, from: K, to: K) -> Keys<'_, K, V> {
        Keys::new(self.range(from, to))
    }

    pub fn values_in_range(&self, from: K, to: K) -> Values<'_, K, V> {
        Values::new(self.range(from, to))
    }

    pub fn to_vec(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    pub fn to_vec_in_range(&self, from: K, to: K) -> Vec<(&K, &V)> {
        self.range(from, to).collect()
    }

    fn is_red(node: &Link<K, V>) -> bool {
        node.as_ref().is_some_and(|n| n.red)
    }

    fn size_of(node: &Link<K, V>) -> u32 {
        node.as_ref().map_or(0, |n| n.size)
    }

    fn update_size(h: &mut Node<K, V>) {
        h.size = 1 + Self::size_of(&h.left) + Self::size_of(&h.right);
    }

    fn rotate_left(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
        debug_assert!(Self::is_red(&h.right));
        let mut x = h.right.take().expect("rotate_left requires a right child");
        h.right = x.left.take();
        x.red = h.red;
        h.red = true;
        x.size = h.size;
        Self::update_size(&mut h);
        x.left = Some(h);
        x
    }

    fn rotate_right(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
        debug_assert!(Self::is_red(&h.left));
        let mut x = h.left.take().expect("rotate_right requires a left child");
        h.left = x.right.take();
        x.red = h.red;
        h.red = true;
        x.size = h.size;
        Self::update_size(&mut h);
        x.right = Some(h);
        x
    }

    fn flip_colors(h: &mut Node<K, V>) {
        h.red = !h.red;
        if let Some(left) = h.left.as_deref_mut() {
            left.red = !left.red;
        }
        if let Some(right) = h.right.as_deref_mut() {
            right.red = !right.red;
        }
    }

    fn move_red_left(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Self::flip_colors(&mut h);
        if h.right.as_ref().is_some_and(|r| Self::is_red(&r.left)) {
            let right = h.right.take().expect("checked above");
            h.right = Some(Self::rotate_right(right));
            h = Self::rotate_left(h);
            Self::flip_colors(&mut h);
        }
        h
    }

    fn move_red_right(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Self::flip_colors(&mut h);
        if h.left.as_ref().is_some_and(|l| Self::is_red(&l.left)) {
            h = Self::rotate_right(h);
            Self::flip_colors(&mut h);
        }
        h
    }

    // Restores the left-leaning invariants after a local perturbation.
    // The rotation order matters: a right rotation must only be tried
    // after a pending left rotation has fired.
    fn balance(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if Self::is_red(&h.right) && !Self::is_red(&h.left) {
            h = Self::rotate_left(h);
        }
        if Self::is_red(&h.left) && h.left.as_ref().is_some_and(|l| Self::is_red(&l.left)) {
            h = Self::rotate_right(h);
        }
        if Self::is_red(&h.left) && Self::is_red(&h.right) {
            Self::flip_colors(&mut h);
        }
        Self::update_size(&mut h);
        h
    }

    // If both children of the root are black, make the root red so the
    // delete descent always has a red link to spend.
    fn spend_red(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if !Self::is_red(&root.left) && !Self::is_red(&root.right) {
            root.red = true;
        }
        root
    }

    fn insert_node(link: Link<K, V>, key: K, value: V) -> Box<Node<K, V>> {
        let Some(mut h) = link else {
            return Box::new(Node::new(key, value));
        };

        match key.cmp(&h.key) {
            Ordering::Less => h.left = Some(Self::insert_node(h.left.take(), key, value)),
            Ordering::Greater => h.right = Some(Self::insert_node(h.right.take(), key, value)),
            Ordering::Equal => h.value = value,
        }

        Self::balance(h)
    }

    fn delete_min_node(mut h: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
        if h.left.is_none() {
            let right = h.right.take();
            return (right, h);
        }
        if !Self::is_red(&h.left) && !h.left.as_ref().is_some_and(|l| Self::is_red(&l.left)) {
            h = Self::move_red_left(h);
        }
        let (left, min) = Self::delete_min_node(h.left.take().expect("left checked above"));
        h.left = left;
        (Some(Self::balance(h)), min)
    }

    fn delete_max_node(mut h: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
        if Self::is_red(&h.left) {
            h = Self::rotate_right(h);
        }
        if h.right.is_none() {
            let left = h.left.take();
            return (left, h);
        }
        if !Self::is_red(&h.right) && !h.right.as_ref().is_some_and(|r| Self::is_red(&r.left)) {
            h = Self::move_red_right(h);
        }
        let (right, max) = Self::delete_max_node(h.right.take().expect("right checked above"));
        h.right = right;
        (Some(Self::balance(h)), max)
    }

    fn remove_node(link: Link<K, V>, key: &K) -> (Link<K, V>, Option<V>) {
        let Some(mut h) = link else {
            return (None, None);
        };

        let removed = if key < &h.key {
            if h.left.is_none() {
                // Key is absent; nothing below changed.
                return (Some(h), None);
            }
            if !Self::is_red(&h.left) && !h.left.as_ref().is_some_and(|l| Self::is_red(&l.left)) {
                h = Self::move_red_left(h);
            }
            let (left, removed) = Self::remove_node(h.left.take(), key);
            h.left = left;
            removed
        } else {
            if Self::is_red(&h.left) {
                h = Self::rotate_right(h);
            }
            if key == &h.key && h.right.is_none() {
                return (None, Some(h.value));
            }
            if h.right.is_some()
                && !Self::is_red(&h.right)
                && !h.right.as_ref().is_some_and(|r| Self::is_red(&r.left))
            {
                h = Self::move_red_right(h);
            }

            if key == &h.key {
                // Two children: replace with the in-order successor and
                // delete the successor from the right subtree.
                let removed = {
                    let right = h.right.take().expect("equal key with right child");
                    let (right, min) = Self::delete_min_node(right);
                    h.right = right;
                    let min = *min;
                    let old_value = std::mem::replace(&mut h.value, min.value);
                    h.key = min.key;
                    old_value
                };
                Some(removed)
            } else {
                let (right, removed) = Self::remove_node(h.right.take(), key);
                h.right = right;
                removed
            }
        };

        (Some(Self::balance(h)), removed)
    }

    fn floor_node<'a>(node: Option<&'a Node<K, V>>, key: &K) -> Option<&'a Node<K, V>> {
        let node = node?;
        match key.cmp(&node.key) {
            Ordering::Equal => Some(node),
            Ordering::Less => Self::floor_node(node.left.as_deref(), key),
            Ordering::Greater => Self::floor_node(node.right.as_deref(), key).or(Some(node)),
        }
    }

    fn ceil_node<'a>(node: Option<&'a Node<K, V>>, key: &K) -> Option<&'a Node<K, V>> {
        let node = node?;
        match key.cmp(&node.key) {
            Ordering::Equal => Some(node),
            Ordering::Greater => Self::ceil_node(node.right.as_deref(), key),
            Ordering::Less => Self::ceil_node(node.left.as_deref(), key).or(Some(node)),
        }
    }

    fn select_node(node: &Node<K, V>, rank: u32) -> &Node<K, V> {
        let left_size = Self::size_of(&node.left);
        match rank.cmp(&left_size) {
            Ordering::Less => {
                Self::select_node(node.left.as_deref().expect("rank below left size"), rank)
            }
            Ordering::Greater => Self::select_node(
                node.right.as_deref().expect("rank above left size"),
                rank - left_size - 1,
            ),
            Ordering::Equal => node,
        }
    }

    fn rank_node(node: Option<&Node<K, V>>, key: &K) -> u32 {
        let Some(node) = node else {
            return 0;
        };
        match key.cmp(&node.key) {
            Ordering::Less => Self::rank_node(node.left.as_deref(), key),
            Ordering::Greater => {
                1 + Self::size_of(&node.left) + Self::rank_node(node.right.as_deref(), key)
            }
            Ordering::Equal => Self::size_of(&node.left),
        }
    }

    fn height_node(node: Option<&Node<K, V>>) -> isize {
        match node {
            None => -1,
            Some(n) => {
                1 + Self::height_node(n.left.as_deref()).max(Self::height_node(n.right.as_deref()))
            }
        }
    }

    // Worklist teardown so dropping a deep tree never recurses through
    // the Box drop chain.
    fn drop_tree(root: Link<K, V>) {
        let mut stack = Vec::new();
        stack.extend(root);
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K: Ord, V> Drop for LlrbTreeMap<K, V> {
    fn drop(&mut self) {
        Self::drop_tree(self.root.take());
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a LlrbTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<K: Ord, V> LlrbTreeMap<K, V> {
    /// Checks every structural invariant: BST order, no red right
    /// child, no two reds in a row, perfect black balance, black root,
    /// exact subtree sizes.
    pub(crate) fn assert_invariants(&self) {
        if let Some(root) = self.root.as_deref() {
            assert!(!root.red, "root must be black");
            Self::check_node(root, None, None);
        }
    }

    fn check_node<'a>(node: &'a Node<K, V>, lo: Option<&'a K>, hi: Option<&'a K>) -> u32 {
        if let Some(lo) = lo {
            assert!(node.key > *lo, "BST order violated on the left");
        }
        if let Some(hi) = hi {
            assert!(node.key < *hi, "BST order violated on the right");
        }
        assert!(!Self::is_red(&node.right), "red link must lean left");
        if node.red {
            assert!(!Self::is_red(&node.left), "two red links in a row");
        }

        let lbh = node
            .left
            .as_deref()
            .map_or(0, |l| Self::check_node(l, lo, Some(&node.key)));
        let rbh = node
            .right
            .as_deref()
            .map_or(0, |r| Self::check_node(r, Some(&node.key), hi));
        assert_eq!(lbh, rbh, "black balance violated");
        assert_eq!(
            node.size,
            1 + Self::size_of(&node.left) + Self::size_of(&node.right),
            "stale subtree size"
        );

        lbh + u32::from(!node.red)
    }
}
