use alloc::vec::Vec;
use core::ops::AddAssign;

use super::PersistentAvl;
use crate::raw;

impl<K: Ord> PersistentAvl<K> {
    /// Returns the keys in `[min, max]` in ascending order.
    ///
    /// Subtrees that cannot hold a key in the range are never visited. If `min > max` the result
    /// is empty and no node is visited.
    ///
    /// # Complexity
    ///
    /// O(log n + m) for `m` returned keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45]);
    /// assert_eq!(tree.range_query(&30, &60), [&30, &35, &40, &45, &50, &60]);
    /// assert!(tree.range_query(&100, &200).is_empty());
    /// assert!(tree.range_query(&5, &3).is_empty());
    /// ```
    #[must_use]
    pub fn range_query(&self, min: &K, max: &K) -> Vec<&K> {
        let mut out = Vec::new();
        if min <= max {
            raw::collect_range(self.root(), min, max, &mut out);
        }
        out
    }

    /// Returns the number of keys in `[min, max]`, or 0 if `min > max`.
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
    /// let tree: PersistentAvl<i32> = (1..=100).collect();
    /// assert_eq!(tree.count_in_range(&10, &19), 10);
    /// assert_eq!(tree.count_in_range(&19, &10), 0);
    /// ```
    #[must_use]
    pub fn count_in_range(&self, min: &K, max: &K) -> usize {
        if min > max {
            return 0;
        }
        raw::count_range(self.root(), min, max)
    }

    /// Returns the smallest key in `[min, max]`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn min_in_range(&self, min: &K, max: &K) -> Option<&K> {
        if min > max {
            return None;
        }
        raw::min_in(self.root(), min, max)
    }

    /// Returns the largest key in `[min, max]`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn max_in_range(&self, min: &K, max: &K) -> Option<&K> {
        if min > max {
            return None;
        }
        raw::max_in(self.root(), min, max)
    }
}

impl<K: Clone + Ord> PersistentAvl<K> {
    /// Returns the sum of the keys in `[min, max]`, or `S::default()` if `min > max`.
    ///
    /// Each key is converted into the accumulator `S` before it is added, so keys can be summed
    /// into a wider type than their own. `S` overflows exactly as its `+=` does.
    ///
    /// # Complexity
    ///
    /// O(log n + m) for `m` keys in the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::PersistentAvl;
    ///
    /// let tree = PersistentAvl::from([5, 10, 15, 20]);
    /// assert_eq!(tree.sum_in_range::<i32>(&6, &20), 45);
    /// assert_eq!(tree.sum_in_range::<i32>(&20, &6), 0);
    ///
    /// let big = PersistentAvl::from([i32::MAX - 1, i32::MAX]);
    /// assert_eq!(big.sum_in_range::<i64>(&0, &i32::MAX), 2 * i64::from(i32::MAX) - 1);
    /// ```
    #[must_use]
    pub fn sum_in_range<S>(&self, min: &K, max: &K) -> S
    where
        S: Default + AddAssign + From<K>,
    {
        let mut total = S::default();
        if min <= max {
            raw::sum_range(self.root(), min, max, &mut total);
        }
        total
    }
}
