use std::marker::PhantomData;

/// Decides the heap order of one shared array-backed core.
///
/// `below(a, b)` is true when `a` must sit below `b`: for a max-heap
/// that is `a < b`, for a min-heap `a > b`.
pub trait HeapPolicy<K> {
    fn below(a: &K, b: &K) -> bool;
}

pub struct MaxPolicy;

impl<K: Ord> HeapPolicy<K> for MaxPolicy {
    fn below(a: &K, b: &K) -> bool {
        a < b
    }
}

pub struct MinPolicy;

impl<K: Ord> HeapPolicy<K> for MinPolicy {
    fn below(a: &K, b: &K) -> bool {
        a > b
    }
}

pub type BinaryMaxHeap<K> = BinaryHeap<K, MaxPolicy>;
pub type BinaryMinHeap<K> = BinaryHeap<K, MinPolicy>;

/// Array-backed binary heap.
///
/// - `insert`, `pop` and `replace_root` are O(log n); `heapify` is
///   O(n) bottom-up.
/// - `contains`, `remove` and `update` scan the array first and are
///   O(n) — a documented weakness of the keyed operations.
/// - `meld` destructively empties the other heap into this one in
///   O(n log n); `merge` is its non-destructive counterpart.
pub struct BinaryHeap<K, P: HeapPolicy<K>> {
    items: Vec<K>,
    _policy: PhantomData<P>,
}

impl<K, P: HeapPolicy<K>> Default for BinaryHeap<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P: HeapPolicy<K>> BinaryHeap<K, P> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _policy: PhantomData,
        }
    }

    /// O(n) bottom-up construction.
    pub fn heapify(items: Vec<K>) -> Self {
        let mut heap = Self {
            items,
            _policy: PhantomData,
        };
        let len = heap.items.len();
        for i in (0..len / 2).rev() {
            heap.sink(i);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every element and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    /// The root: the maximum under `MaxPolicy`, the minimum under
    /// `MinPolicy`.
    pub fn peek(&self) -> Option<&K> {
        self.items.first()
    }

    /// Inserts `key`, returning the new element count.
    pub fn insert(&mut self, key: K) -> usize {
        self.items.push(key);
        self.swim(self.items.len() - 1);
        self.items.len()
    }

    /// Removes and returns the root.
    pub fn pop(&mut self) -> Option<K> {
        if self.items.is_empty() {
            return None;
        }
        let root = self.items.swap_remove(0);
        self.sink(0);
        Some(root)
    }

    /// Replaces the root with `key` and returns the old root; inserts
    /// into an empty heap.
    pub fn replace_root(&mut self, key: K) -> Option<K> {
        if self.items.is_empty() {
            self.items.push(key);
            return None;
        }
        let old = std::mem::replace(&mut self.items[0], key);
        self.sink(0);
        Some(old)
    }

    /// Linear scan; O(n).
    pub fn contains(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.items.contains(key)
    }

    /// Removes one occurrence of `key`; true iff one was present.
    /// Linear scan; O(n).
    pub fn remove(&mut self, key: &K) -> bool
    where
        K: PartialEq,
    {
        let Some(index) = self.items.iter().position(|k| k == key) else {
            return false;
        };
        self.items.swap_remove(index);
        if index < self.items.len() {
            self.resift(index);
        }
        true
    }

    /// Replaces one occurrence of `key` with `new_key` and restores
    /// heap order; true iff `key` was present. Linear scan; O(n).
    pub fn update(&mut self, key: &K, new_key: K) -> bool
    where
        K: PartialEq,
    {
        self.update_with(key, |_| new_key)
    }

    /// Like [`update`](Self::update) but derives the replacement from
    /// the old key.
    pub fn update_with(&mut self, key: &K, f: impl FnOnce(&K) -> K) -> bool
    where
        K: PartialEq,
    {
        let Some(index) = self.items.iter().position(|k| k == key) else {
            return false;
        };
        let new_key = f(&self.items[index]);
        self.items[index] = new_key;
        self.resift(index);
        true
    }

    /// Non-destructive merge of two heaps into a new one.
    pub fn merge(left: &Self, right: &Self) -> Self
    where
        K: Clone,
    {
        if left.items.is_empty() {
            return Self::heapify(right.items.clone());
        }
        if right.items.is_empty() {
            return Self::heapify(left.items.clone());
        }
        let mut items = left.items.clone();
        items.extend(right.items.iter().cloned());
        Self::heapify(items)
    }

    /// Destructive merge: empties `other` into `self`.
    ///
    /// Every element of the smaller side that outranks the larger
    /// side's root is swapped into place first, then the leftover
    /// elements are appended and sifted up.
    pub fn meld(&mut self, other: &mut Self) {
        if other.items.is_empty() {
            return;
        }
        if self.items.is_empty() {
            self.items = std::mem::take(&mut other.items);
            return;
        }

        // Iterate over the smaller array.
        if self.items.len() > other.items.len() {
            std::mem::swap(&mut self.items, &mut other.items);
        }

        let len = self.items.len();
        for i in 0..len {
            if P::below(&self.items[i], &other.items[0]) {
                std::mem::swap(&mut self.items[i], &mut other.items[0]);
                other.sink(0);
            }
        }

        self.items.append(&mut other.items);
        for i in len..self.items.len() {
            self.swim(i);
        }
    }

    fn swim(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !P::below(&self.items[parent], &self.items[index]) {
                break;
            }
            self.items.swap(parent, index);
            index = parent;
        }
    }

    fn sink(&mut self, mut index: usize) {
        loop {
            let mut child = index * 2 + 1;
            if child >= self.items.len() {
                break;
            }
            if child + 1 < self.items.len() && P::below(&self.items[child], &self.items[child + 1])
            {
                child += 1;
            }
            if !P::below(&self.items[index], &self.items[child]) {
                break;
            }
            self.items.swap(index, child);
            index = child;
        }
    }

    // A replaced element can violate heap order in either direction.
    fn resift(&mut self, index: usize) {
        if index > 0 && P::below(&self.items[(index - 1) / 2], &self.items[index]) {
            self.swim(index);
        } else {
            self.sink(index);
        }
    }
}
