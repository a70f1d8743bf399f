//! Range queries over `[min, max]` that skip subtrees which cannot hold a qualifying key.
//!
//! Callers reject `min > max` before reaching these functions.

use alloc::vec::Vec;
use core::ops::AddAssign;

use super::node::{Link, size};

/// Appends every key in `[min, max]` to `out` in ascending order.
pub(crate) fn collect<'a, K: Ord>(link: &'a Link<K>, min: &K, max: &K, out: &mut Vec<&'a K>) {
    let Some(node) = link else {
        return;
    };
    let key = node.key();
    if key > max {
        collect(node.left(), min, max, out);
    } else if key < min {
        collect(node.right(), min, max, out);
    } else {
        collect(node.left(), min, max, out);
        out.push(key);
        collect(node.right(), min, max, out);
    }
}

/// Counts the keys in `[min, max]`.
///
/// Once a node inside the range is reached, each side only needs one bound, and a subtree
/// whose root already satisfies that bound contributes its full left or right size.
pub(crate) fn count<K: Ord>(link: &Link<K>, min: &K, max: &K) -> usize {
    let Some(node) = link else {
        return 0;
    };
    let key = node.key();
    if key > max {
        count(node.left(), min, max)
    } else if key < min {
        count(node.right(), min, max)
    } else {
        count_at_least(node.left(), min) + 1 + count_at_most(node.right(), max)
    }
}

fn count_at_least<K: Ord>(mut link: &Link<K>, min: &K) -> usize {
    let mut total = 0;
    while let Some(node) = link {
        if node.key() < min {
            link = node.right();
        } else {
            total += size(node.right()) + 1;
            link = node.left();
        }
    }
    total
}

fn count_at_most<K: Ord>(mut link: &Link<K>, max: &K) -> usize {
    let mut total = 0;
    while let Some(node) = link {
        if node.key() > max {
            link = node.left();
        } else {
            total += size(node.left()) + 1;
            link = node.right();
        }
    }
    total
}

/// Adds every key in `[min, max]` into `acc`, converting each key to the accumulator type.
pub(crate) fn sum<K, S>(link: &Link<K>, min: &K, max: &K, acc: &mut S)
where
    K: Ord + Clone,
    S: AddAssign + From<K>,
{
    let Some(node) = link else {
        return;
    };
    let key = node.key();
    if key > max {
        sum(node.left(), min, max, acc);
    } else if key < min {
        sum(node.right(), min, max, acc);
    } else {
        sum(node.left(), min, max, acc);
        *acc += S::from(key.clone());
        sum(node.right(), min, max, acc);
    }
}

/// Returns the smallest key in `[min, max]`.
pub(crate) fn min_in<'a, K: Ord>(mut link: &'a Link<K>, min: &K, max: &K) -> Option<&'a K> {
    let mut best = None;
    while let Some(node) = link {
        let key = node.key();
        if key < min {
            link = node.right();
        } else {
            if key <= max {
                best = Some(key);
            }
            link = node.left();
        }
    }
    best
}

/// Returns the largest key in `[min, max]`.
pub(crate) fn max_in<'a, K: Ord>(mut link: &'a Link<K>, min: &K, max: &K) -> Option<&'a K> {
    let mut best = None;
    while let Some(node) = link {
        let key = node.key();
        if key > max {
            link = node.left();
        } else {
            if key >= min {
                best = Some(key);
            }
            link = node.right();
        }
    }
    best
}
