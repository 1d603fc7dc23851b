use crate::map::Node;

/// Resumable in-order iterator over tree entries.
///
/// - Walks with an explicit parent stack instead of recursion, so
///   iteration never consumes call-stack depth proportional to the
///   tree.
/// - `center` records that the most recent yield was the top frame's
///   own entry rather than a child's; the next step then moves into
///   the right subtree or climbs.
/// - With bounds set, subtrees entirely below `min` are abandoned on
///   the way down and the first key above `max` terminates the
///   iterator for good.
///
/// The iterator borrows the tree, so mutating the tree while one is
/// live does not compile.
pub struct Iter<'a, K, V> {
    parents: Vec<(&'a Node<K, V>, bool)>,
    center: bool,
    min: Option<K>,
    max: Option<K>,
}

impl<'a, K: Ord, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, min: Option<K>, max: Option<K>) -> Self {
        let mut parents = Vec::new();
        let empty_range = matches!((&min, &max), (Some(lo), Some(hi)) if lo > hi);
        if let Some(root) = root {
            if !empty_range {
                parents.push((root, false));
            }
        }
        Self {
            parents,
            center: false,
            min,
            max,
        }
    }

    fn next_node(&mut self) -> Option<&'a Node<K, V>> {
        // left_done marks a frame whose left subtree is exhausted but
        // whose own entry has not been yielded yet.
        let (mut node, left_done) = self.parents.pop()?;

        if self.center {
            match node.right.as_deref() {
                Some(right) => {
                    node = right;
                    if node.left.is_none() {
                        // The in-order successor. A node without a left
                        // child has no right child either (red links
                        // lean left), so there is nothing to push.
                        self.center = false;
                        return self.check_max(node);
                    }
                    // Descend the new subtree's left spine below.
                }
                None => {
                    // Climb: the nearest pending ancestor is next.
                    let &(parent, _) = self.parents.last()?;
                    return self.check_max(parent);
                }
            }
        } else if left_done {
            self.center = true;
            self.parents.push((node, true));
            return self.check_max(node);
        }

        // Sink down the left spine. Subtrees rooted below `min`
        // cannot contribute, so skip to their right child instead.
        loop {
            if self.min.as_ref().is_some_and(|m| node.key < *m) {
                match node.right.as_deref() {
                    Some(right) => node = right,
                    None => {
                        // Everything here is below the bound; the last
                        // pushed ancestor is the smallest qualifying key.
                        node = self.parents.pop()?.0;
                        break;
                    }
                }
            } else if let Some(left) = node.left.as_deref() {
                self.parents.push((node, true));
                node = left;
            } else {
                break;
            }
        }

        self.center = true;
        self.parents.push((node, true));
        self.check_max(node)
    }

    // The upper bound is a hard cutoff, not a filter: the first key
    // above it ends the iteration.
    fn check_max(&mut self, node: &'a Node<K, V>) -> Option<&'a Node<K, V>> {
        match &self.max {
            Some(max) if node.key > *max => {
                self.parents.clear();
                None
            }
            _ => Some(node),
        }
    }
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|n| (&n.key, &n.value))
    }
}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K: Ord, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K: Ord, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_node().map(|n| &n.key)
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K: Ord, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K: Ord, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_node().map(|n| &n.value)
    }
}
