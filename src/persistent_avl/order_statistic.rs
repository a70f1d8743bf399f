use alloc::vec::Vec;
use core::borrow::Borrow;
use core::ops::Index;

use super::PersistentAvl;
use crate::raw;
use crate::{Distance, Rank};

impl<K: Ord> PersistentAvl<K> {
    /// Returns the one-based position `key` holds, or would hold if it were inserted.
    ///
    /// This equals one plus the number of keys strictly less than `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([10, 20, 30]);
    /// assert_eq!(tree.rank(&20), 2);
    /// assert_eq!(tree.rank(&25), 3);
    /// assert_eq!(tree.rank(&99), 4);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        raw::rank(self.root(), key)
    }

    /// Returns the one-based rank of `key`, or `None` if the key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([10, 20]);
    /// assert_eq!(tree.rank_of(&20), Some(2));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        raw::rank_of(self.root(), key)
    }

    /// Returns the key at one-based rank `k`, or `None` unless `1 <= k <= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([30, 10, 20]);
    /// assert_eq!(tree.select(1), Some(&10));
    /// assert_eq!(tree.select(3), Some(&30));
    /// assert_eq!(tree.select(0), None);
    /// assert_eq!(tree.select(4), None);
    /// ```
    #[must_use]
    pub fn select(&self, k: usize) -> Option<&K> {
        raw::select(self.root(), k)
    }

    /// Returns the `k`-th smallest key. Same as [`select`](Self::select).
    #[must_use]
    pub fn kth_smallest(&self, k: usize) -> Option<&K> {
        self.select(k)
    }

    /// Returns the `k`-th largest key, or `None` unless `1 <= k <= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([30, 10, 20]);
    /// assert_eq!(tree.kth_largest(1), Some(&30));
    /// assert_eq!(tree.kth_largest(3), Some(&10));
    /// ```
    #[must_use]
    pub fn kth_largest(&self, k: usize) -> Option<&K> {
        raw::kth_largest(self.root(), k)
    }

    /// Returns the keys with ranks `k..=j` in ascending order, or `None` unless
    /// `1 <= k <= j <= len`.
    ///
    /// # Complexity
    ///
    /// O(log n + (j - k))
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([50, 10, 40, 20, 30]);
    /// assert_eq!(tree.kth_to_jth_smallest(2, 4), Some(vec![&20, &30, &40]));
    /// assert_eq!(tree.kth_to_jth_smallest(4, 2), None);
    /// ```
    #[must_use]
    pub fn kth_to_jth_smallest(&self, k: usize, j: usize) -> Option<Vec<&K>> {
        if k == 0 || k > j || j > self.len() {
            return None;
        }
        let mut out = Vec::with_capacity(j - k + 1);
        raw::collect_ranks(self.root(), k, j, 0, &mut out);
        Some(out)
    }

    /// Returns the greatest key less than or equal to `key`.
    #[must_use]
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        raw::floor(self.root(), key)
    }

    /// Returns the least key greater than or equal to `key`.
    #[must_use]
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        raw::ceiling(self.root(), key)
    }
}

impl<K: Ord + Distance> PersistentAvl<K> {
    /// Returns the key nearest to `target`. On a tie the smaller key wins.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([10, 20, 30]);
    /// assert_eq!(tree.closest(&24), Some(&20));
    /// assert_eq!(tree.closest(&25), Some(&20));
    /// assert_eq!(tree.closest(&26), Some(&30));
    /// ```
    #[must_use]
    pub fn closest(&self, target: &K) -> Option<&K> {
        raw::closest(self.root(), target)
    }
}

/// Indexes into the tree by one-based rank.
///
/// # Panics
///
/// Panics if `rank` is not in `1..=len`.
impl<K: Ord> Index<Rank> for PersistentAvl<K> {
    type Output = K;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select(rank.0).expect("index out of bounds")
    }
}
