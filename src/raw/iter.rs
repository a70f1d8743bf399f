use smallvec::SmallVec;

use super::node::{Link, Node, size};

// Enough for every tree of up to ~2^22 keys without spilling to the heap.
type Stack<'a, K> = SmallVec<[&'a Node<K>; 32]>;

/// A double-ended in-order walk over a subtree.
///
/// The two ends keep independent stacks; `remaining` stops them once they meet.
pub(crate) struct RawIter<'a, K> {
    front: Stack<'a, K>,
    back: Stack<'a, K>,
    remaining: usize,
}

impl<K> Clone for RawIter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> RawIter<'a, K> {
    pub(crate) fn new(root: &'a Link<K>) -> Self {
        let mut iter = Self {
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: size(root),
        };
        iter.push_left_spine(root.as_deref());
        iter.push_right_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.front.push(n);
            node = n.left().as_deref();
        }
    }

    fn push_right_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.back.push(n);
            node = n.right().as_deref();
        }
    }

    pub(crate) fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        self.push_left_spine(node.right().as_deref());
        self.remaining -= 1;
        Some(node.key())
    }

    pub(crate) fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        self.push_right_spine(node.left().as_deref());
        self.remaining -= 1;
        Some(node.key())
    }

    pub(crate) fn len(&self) -> usize {
        self.remaining
    }
}
