use alloc::sync::Arc;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use super::node::{Link, Node};
use super::rotation::rebalance;

fn link<K>(node: Node<K>) -> Link<K> {
    Some(Arc::new(node))
}

/// Removes `key` from `subtree` by path copying.
///
/// Returns the root of the new subtree (absent if it became empty), or `None` if `key` was
/// not found, in which case nothing was allocated and the caller keeps the original subtree.
pub(crate) fn remove<K, Q>(subtree: &Link<K>, key: &Q) -> Option<Link<K>>
where
    K: Clone + Borrow<Q>,
    Q: ?Sized + Ord,
{
    let node = subtree.as_ref()?;

    let rebuilt = match key.cmp(node.key().borrow()) {
        Less => {
            let left = remove(node.left(), key)?;
            Node::new(node.key().clone(), left, node.right().clone())
        }
        Greater => {
            let right = remove(node.right(), key)?;
            Node::new(node.key().clone(), node.left().clone(), right)
        }
        Equal => match (node.left(), node.right()) {
            (None, None) => return Some(None),
            (Some(only), None) | (None, Some(only)) => return Some(Some(Arc::clone(only))),
            (Some(_), Some(right)) => {
                let (successor, right) = remove_min(right);
                Node::new(successor, node.left().clone(), right)
            }
        },
    };

    Some(link(rebalance(rebuilt)))
}

/// Removes the leftmost node of a non-empty subtree, returning its key and the new subtree.
pub(crate) fn remove_min<K: Clone>(node: &Arc<Node<K>>) -> (K, Link<K>) {
    match node.left() {
        None => (node.key().clone(), node.right().clone()),
        Some(left) => {
            let (min, left) = remove_min(left);
            let rebuilt = Node::new(node.key().clone(), left, node.right().clone());
            (min, link(rebalance(rebuilt)))
        }
    }
}

/// Removes the rightmost node of a non-empty subtree, returning its key and the new subtree.
pub(crate) fn remove_max<K: Clone>(node: &Arc<Node<K>>) -> (K, Link<K>) {
    match node.right() {
        None => (node.key().clone(), node.left().clone()),
        Some(right) => {
            let (max, right) = remove_max(right);
            let rebuilt = Node::new(node.key().clone(), node.left().clone(), right);
            (max, link(rebalance(rebuilt)))
        }
    }
}
