use alloc::sync::Arc;
use core::cmp::Ordering::{Equal, Greater, Less};

use super::node::{Link, Node};
use super::rotation::rebalance_insert;

/// Inserts `key` below `link` by path copying.
///
/// Returns the root of the new subtree, or `None` if `key` is already present, in which case
/// nothing was allocated and the caller keeps the original subtree.
pub(crate) fn insert<K: Clone + Ord>(link: &Link<K>, key: &K) -> Option<Node<K>> {
    let Some(node) = link else {
        return Some(Node::leaf(key.clone()));
    };

    let rebuilt = match key.cmp(node.key()) {
        Less => {
            let left = insert(node.left(), key)?;
            Node::new(node.key().clone(), Some(Arc::new(left)), node.right().clone())
        }
        Greater => {
            let right = insert(node.right(), key)?;
            Node::new(node.key().clone(), node.left().clone(), Some(Arc::new(right)))
        }
        Equal => return None,
    };

    Some(rebalance_insert(rebuilt, key))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::raw::node::validate;

    fn build(keys: &[i32]) -> Link<i32> {
        let mut root = None;
        for key in keys {
            if let Some(node) = insert(&root, key) {
                root = Some(Arc::new(node));
            }
        }
        root
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let keys: alloc::vec::Vec<i32> = (0..1000).collect();
        let root = build(&keys);
        let (height, size) = validate(&root).unwrap();
        assert_eq!(size, 1000);
        // 1.44 * log2(1000) ~= 14.4
        assert!(height <= 14, "height {height}");
    }

    #[test]
    fn duplicate_insert_allocates_nothing() {
        let root = build(&[2, 1, 3]);
        assert!(insert(&root, &1).is_none());
        assert!(insert(&root, &2).is_none());
    }

    #[test]
    fn insert_shares_untouched_subtree() {
        let root = build(&[50, 30, 70]);
        let new_root = insert(&root, &20).unwrap();

        let old = root.as_ref().unwrap();
        assert!(Arc::ptr_eq(old.right().as_ref().unwrap(), new_root.right().as_ref().unwrap()));
        assert!(!Arc::ptr_eq(old.left().as_ref().unwrap(), new_root.left().as_ref().unwrap()));

        // The base is unchanged.
        assert_eq!(old.size(), 3);
        assert_eq!(new_root.size(), 4);
    }
}
