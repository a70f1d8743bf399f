use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use super::node::{Link, size};
use crate::order_statistic::Distance;

/// Returns the one-based position `key` occupies, or would occupy if it were inserted.
pub(crate) fn rank<K, Q>(mut link: &Link<K>, key: &Q) -> usize
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut before = 0;
    while let Some(node) = link {
        match key.cmp(node.key().borrow()) {
            Less => link = node.left(),
            Greater => {
                before += size(node.left()) + 1;
                link = node.right();
            }
            Equal => return before + size(node.left()) + 1,
        }
    }
    before + 1
}

/// Returns the one-based rank of `key`, or `None` if it is absent.
pub(crate) fn rank_of<K, Q>(mut link: &Link<K>, key: &Q) -> Option<usize>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut before = 0;
    while let Some(node) = link {
        match key.cmp(node.key().borrow()) {
            Less => link = node.left(),
            Greater => {
                before += size(node.left()) + 1;
                link = node.right();
            }
            Equal => return Some(before + size(node.left()) + 1),
        }
    }
    None
}

/// Returns the key with one-based rank `k`, or `None` if `k` is not in `1..=size`.
pub(crate) fn select<K>(mut link: &Link<K>, mut k: usize) -> Option<&K> {
    if k == 0 || k > size(link) {
        return None;
    }
    while let Some(node) = link {
        let left = size(node.left());
        match k.cmp(&(left + 1)) {
            Less => link = node.left(),
            Equal => return Some(node.key()),
            Greater => {
                k -= left + 1;
                link = node.right();
            }
        }
    }
    None
}

/// Returns the `k`-th largest key (one-based), or `None` if `k` is not in `1..=size`.
pub(crate) fn kth_largest<K>(mut link: &Link<K>, mut k: usize) -> Option<&K> {
    if k == 0 || k > size(link) {
        return None;
    }
    while let Some(node) = link {
        let right = size(node.right());
        match k.cmp(&(right + 1)) {
            Less => link = node.right(),
            Equal => return Some(node.key()),
            Greater => {
                k -= right + 1;
                link = node.left();
            }
        }
    }
    None
}

/// Appends, in ascending order, the keys whose one-based ranks fall in `first..=last`.
///
/// `offset` is the number of keys that precede this subtree. Subtrees entirely outside the
/// rank window are skipped.
pub(crate) fn collect_ranks<'a, K>(link: &'a Link<K>, first: usize, last: usize, offset: usize, out: &mut Vec<&'a K>) {
    let Some(node) = link else {
        return;
    };
    let own = offset + size(node.left()) + 1;
    if first < own {
        collect_ranks(node.left(), first, last, offset, out);
    }
    if (first..=last).contains(&own) {
        out.push(node.key());
    }
    if last > own {
        collect_ranks(node.right(), first, last, own, out);
    }
}

/// Returns the key nearest to `target`, preferring the smaller key on a tie.
pub(crate) fn closest<'a, K: Ord + Distance>(mut link: &'a Link<K>, target: &K) -> Option<&'a K> {
    let mut best: Option<(&K, K::Output)> = None;
    while let Some(node) = link {
        let key = node.key();
        let d = key.distance(target);
        let better = match &best {
            None => true,
            Some((best_key, best_d)) => d < *best_d || (d == *best_d && key < *best_key),
        };
        if better {
            best = Some((key, d));
        }
        match target.cmp(key) {
            Less => link = node.left(),
            Greater => link = node.right(),
            Equal => break,
        }
    }
    best.map(|(key, _)| key)
}

/// Returns the greatest key less than or equal to `key`.
pub(crate) fn floor<'a, K, Q>(mut link: &'a Link<K>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut best = None;
    while let Some(node) = link {
        match key.cmp(node.key().borrow()) {
            Less => link = node.left(),
            Greater => {
                best = Some(node.key());
                link = node.right();
            }
            Equal => return Some(node.key()),
        }
    }
    best
}

/// Returns the least key greater than or equal to `key`.
pub(crate) fn ceiling<'a, K, Q>(mut link: &'a Link<K>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut best = None;
    while let Some(node) = link {
        match key.cmp(node.key().borrow()) {
            Less => {
                best = Some(node.key());
                link = node.left();
            }
            Greater => link = node.right(),
            Equal => return Some(node.key()),
        }
    }
    best
}
