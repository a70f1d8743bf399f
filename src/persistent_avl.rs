use alloc::sync::Arc;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::raw::{self, Link, RawIter, Violation};

mod order_statistic;
mod range;

/// An immutable ordered set backed by a persistent AVL tree.
///
/// Every "mutating" method takes `&self` and returns a new tree. The new tree rebuilds only the
/// nodes on the search path and shares every other subtree with `self`, so both trees remain
/// valid and cloning is O(1).
///
/// Each node caches the size of its subtree, which gives O(log n) rank and select queries, and
/// range counts that skip whole subtrees.
///
/// Inserting a key that is already present returns a tree sharing the original root: the set
/// never holds duplicates and the stored key is not replaced.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key, as determined by the [`Ord`] trait, changes while it is in the tree.
///
/// # Examples
///
/// ```
/// use persistent_avl::PersistentAvl;
///
/// let empty = PersistentAvl::new();
/// let one = empty.insert(10);
/// let two = one.insert(20);
///
/// // Older trees are untouched.
/// assert!(empty.is_empty());
/// assert_eq!(one.iter().copied().collect::<Vec<_>>(), [10]);
/// assert_eq!(two.iter().copied().collect::<Vec<_>>(), [10, 20]);
///
/// let fewer = two.remove(&10);
/// assert_eq!(fewer.len(), 1);
/// assert_eq!(two.len(), 2);
/// ```
pub struct PersistentAvl<K> {
    root: Link<K>,
}

/// An in-order iterator over the keys of a [`PersistentAvl`].
///
/// This `struct` is created by the [`iter`] method on [`PersistentAvl`].
///
/// # Examples
///
/// ```
/// use persistent_avl::PersistentAvl;
///
/// let tree = PersistentAvl::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: PersistentAvl::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: 'a> {
    inner: RawIter<'a, K>,
}

impl<K> PersistentAvl<K> {
    /// Makes a new, empty tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    pub(crate) fn root(&self) -> &Link<K> {
        &self.root
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::new().insert(1).insert(2).insert(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        raw::size(&self.root)
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree; an empty tree has height 0.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(raw::height(&self.root))
    }

    /// Returns `true` if both trees share the same root node.
    ///
    /// Trees that share a root are equal, but equal trees need not share a root.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([1, 2, 3]);
    /// assert!(tree.ptr_eq(&tree.insert(2)));
    /// assert!(!tree.ptr_eq(&tree.insert(4)));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([3, 1, 2]);
    /// let keys: Vec<_> = tree.iter().collect();
    /// assert_eq!(keys, [&1, &2, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: RawIter::new(&self.root),
        }
    }

    /// Returns `true` if every node satisfies the AVL height invariant.
    ///
    /// This walks the whole tree and is meant for tests and diagnostics.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        raw::is_balanced(&self.root)
    }

    /// Returns the smallest key in the tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.root.as_deref().map(|root| root.leftmost().key())
    }

    /// Returns the largest key in the tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.root.as_deref().map(|root| root.rightmost().key())
    }
}

impl<K: Ord> PersistentAvl<K> {
    /// Returns `true` if the tree contains `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([1, 2, 3]);
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        raw::get(&self.root, key).is_some()
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        raw::get(&self.root, key)
    }

    /// Checks every structural invariant and reports the first one found broken.
    ///
    /// # Errors
    ///
    /// Returns the [`Violation`] encountered by a post-order walk.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn validate(&self) -> Result<(), Violation> {
        raw::validate(&self.root).map(|_| ())
    }
}

impl<K: Clone + Ord> PersistentAvl<K> {
    /// Returns a tree that also contains `key`.
    ///
    /// If `key` is already present, the returned tree shares `self`'s root and the stored key is
    /// left as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let base = PersistentAvl::from([50, 30, 70]);
    /// let left = base.insert(15);
    /// let right = base.insert(35);
    ///
    /// assert_eq!(base.len(), 3);
    /// assert!(left.contains(&15) && !left.contains(&35));
    /// assert!(right.contains(&35) && !right.contains(&15));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) time and allocations.
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        match raw::insert(&self.root, &key) {
            Some(root) => Self {
                root: Some(Arc::new(root)),
            },
            None => self.clone(),
        }
    }

    /// Returns a tree without `key`.
    ///
    /// If `key` is absent, the returned tree shares `self`'s root.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([1, 2, 3]);
    /// let smaller = tree.remove(&2);
    ///
    /// assert_eq!(smaller.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// assert!(tree.remove(&9).ptr_eq(&tree));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) time and allocations.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match raw::remove(&self.root, key) {
            Some(root) => Self { root },
            None => self.clone(),
        }
    }

    /// Returns the smallest key together with a tree that no longer holds it.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([2, 1, 3]);
    /// let (min, rest) = tree.pop_first().unwrap();
    /// assert_eq!(min, 1);
    /// assert_eq!(rest.len(), 2);
    /// ```
    #[must_use]
    pub fn pop_first(&self) -> Option<(K, Self)> {
        let root = self.root.as_ref()?;
        let (key, root) = raw::remove_min(root);
        Some((key, Self { root }))
    }

    /// Returns the largest key together with a tree that no longer holds it.
    #[must_use]
    pub fn pop_last(&self) -> Option<(K, Self)> {
        let root = self.root.as_ref()?;
        let (key, root) = raw::remove_max(root);
        Some((key, Self { root }))
    }
}

impl<K> Clone for PersistentAvl<K> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<K> Default for PersistentAvl<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for PersistentAvl<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for PersistentAvl<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for PersistentAvl<K> {}

impl<K: PartialOrd> PartialOrd for PersistentAvl<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord> Ord for PersistentAvl<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash> Hash for PersistentAvl<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for key in self {
            key.hash(state);
        }
    }
}

impl<K: Clone + Ord> FromIterator<K> for PersistentAvl<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut root: Link<K> = None;
        for key in iter {
            if let Some(node) = raw::insert(&root, &key) {
                root = Some(Arc::new(node));
            }
        }
        Self { root }
    }
}

impl<K: Clone + Ord, const N: usize> From<[K; N]> for PersistentAvl<K> {
    fn from(arr: [K; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K> IntoIterator for &'a PersistentAvl<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.inner.len()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn persistent_avl_is_send_and_sync() {
        static_assertions::assert_impl_all!(PersistentAvl<i64>: Send, Sync);
        static_assertions::assert_eq_size!(PersistentAvl<i64>, usize);
    }

    #[test]
    fn remove_shares_sibling_subtrees() {
        let tree = PersistentAvl::from([50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45]);
        let smaller = tree.remove(&10);

        let old = tree.root().as_ref().unwrap();
        let new = smaller.root().as_ref().unwrap();
        assert!(!Arc::ptr_eq(old, new));

        // 10 lives under 50 -> 30 -> 20; only that path is rebuilt.
        let old_30 = old.left().as_ref().unwrap();
        let new_30 = new.left().as_ref().unwrap();
        assert!(!Arc::ptr_eq(old_30, new_30));
        assert!(Arc::ptr_eq(old.right().as_ref().unwrap(), new.right().as_ref().unwrap()));
        assert!(Arc::ptr_eq(old_30.right().as_ref().unwrap(), new_30.right().as_ref().unwrap()));

        let old_20 = old_30.left().as_ref().unwrap();
        let new_20 = new_30.left().as_ref().unwrap();
        assert!(!Arc::ptr_eq(old_20, new_20));
        assert!(Arc::ptr_eq(old_20.right().as_ref().unwrap(), new_20.right().as_ref().unwrap()));
        assert!(new_20.left().is_none());

        assert_eq!(tree.len(), 11);
        assert_eq!(smaller.iter().copied().collect::<Vec<_>>(), [20, 25, 30, 35, 40, 45, 50, 60, 70, 80]);
    }

    #[test]
    fn duplicate_insert_shares_root() {
        let tree = PersistentAvl::from([1, 2, 3]);
        assert!(tree.insert(3).ptr_eq(&tree));
        assert!(PersistentAvl::<i32>::new().ptr_eq(&PersistentAvl::new()));
    }

    #[test]
    fn pop_last_on_empty_is_none() {
        assert!(PersistentAvl::<i32>::new().pop_last().is_none());
        let (max, rest) = PersistentAvl::from([1, 2, 3]).pop_last().unwrap();
        assert_eq!(max, 3);
        assert_eq!(rest.last(), Some(&2));
    }

    #[test]
    fn iter_reports_exact_len() {
        let tree: PersistentAvl<i32> = (0..10).collect();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 10);
        iter.next();
        iter.next_back();
        assert_eq!(iter.len(), 8);
        assert_eq!(iter.last(), Some(&8));
    }
}
