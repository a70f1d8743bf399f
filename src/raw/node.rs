use alloc::sync::Arc;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

/// A shared, possibly absent, reference to a subtree.
pub(crate) type Link<K> = Option<Arc<Node<K>>>;

/// An immutable AVL node augmented with its subtree size.
///
/// Nodes are never modified after construction. Insertion and removal build new nodes along
/// the search path and share every untouched subtree with the previous version.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
    // 1 + max(height(left), height(right)); an absent child has height 0.
    height: u8,
    // 1 + size(left) + size(right); an absent child has size 0.
    size: usize,
}

/// Returns the height of a subtree, or 0 if it is absent.
#[inline]
pub(crate) fn height<K>(link: &Link<K>) -> u8 {
    link.as_ref().map_or(0, |node| node.height)
}

/// Returns the number of keys in a subtree, or 0 if it is absent.
#[inline]
pub(crate) fn size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

impl<K> Node<K> {
    /// Builds a node from a key and two children, deriving its height and size.
    pub(crate) fn new(key: K, left: Link<K>, right: Link<K>) -> Self {
        let h = 1 + height(&left).max(height(&right));
        let s = 1 + size(&left) + size(&right);
        Self {
            key,
            left,
            right,
            height: h,
            size: s,
        }
    }

    /// Builds a childless node.
    pub(crate) fn leaf(key: K) -> Self {
        Self::new(key, None, None)
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn left(&self) -> &Link<K> {
        &self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> &Link<K> {
        &self.right
    }

    #[inline]
    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Returns `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance_factor(&self) -> i16 {
        i16::from(height(&self.left)) - i16::from(height(&self.right))
    }

    /// Consumes the node, returning its key and children.
    pub(crate) fn into_parts(self) -> (K, Link<K>, Link<K>) {
        (self.key, self.left, self.right)
    }

    /// Returns the leftmost node of this subtree.
    pub(crate) fn leftmost(&self) -> &Self {
        let mut current = self;
        while let Some(left) = &current.left {
            current = left;
        }
        current
    }

    /// Returns the rightmost node of this subtree.
    pub(crate) fn rightmost(&self) -> &Self {
        let mut current = self;
        while let Some(right) = &current.right {
            current = right;
        }
        current
    }
}

/// Searches a subtree for `key`.
pub(crate) fn get<'a, K, Q>(mut link: &'a Link<K>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    while let Some(node) = link {
        match key.cmp(node.key.borrow()) {
            Less => link = &node.left,
            Greater => link = &node.right,
            Equal => return Some(&node.key),
        }
    }
    None
}

/// Returns `true` if every node's children differ in height by at most one.
///
/// Heights are recomputed rather than read from the cache.
pub(crate) fn is_balanced<K>(link: &Link<K>) -> bool {
    fn checked_height<K>(link: &Link<K>) -> Option<u8> {
        let Some(node) = link else {
            return Some(0);
        };
        let lh = checked_height(&node.left)?;
        let rh = checked_height(&node.right)?;
        (lh.abs_diff(rh) <= 1).then_some(1 + lh.max(rh))
    }
    checked_height(link).is_some()
}

/// The first invariant found to be violated by [`validate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    /// A node's children differ in height by more than one.
    Unbalanced,
    /// A node's cached height disagrees with its children.
    HeightMismatch,
    /// A node's cached size disagrees with the number of keys below it.
    SizeMismatch,
    /// An in-order traversal is not strictly ascending.
    OutOfOrder,
}

/// Walks the whole subtree and reports the first broken invariant.
///
/// Returns the `(height, size)` of the subtree on success.
pub(crate) fn validate<K: Ord>(link: &Link<K>) -> Result<(u8, usize), Violation> {
    validate_bounded(link, None, None)
}

fn validate_bounded<K: Ord>(link: &Link<K>, lower: Option<&K>, upper: Option<&K>) -> Result<(u8, usize), Violation> {
    let Some(node) = link else {
        return Ok((0, 0));
    };

    if lower.is_some_and(|lo| node.key <= *lo) || upper.is_some_and(|hi| node.key >= *hi) {
        return Err(Violation::OutOfOrder);
    }

    let (lh, ls) = validate_bounded(&node.left, lower, Some(&node.key))?;
    let (rh, rs) = validate_bounded(&node.right, Some(&node.key), upper)?;

    if lh.abs_diff(rh) > 1 {
        return Err(Violation::Unbalanced);
    }
    if node.height != 1 + lh.max(rh) {
        return Err(Violation::HeightMismatch);
    }
    if node.size != 1 + ls + rs {
        return Err(Violation::SizeMismatch);
    }
    Ok((node.height, node.size))
}
