//! Structural repair primitives.
//!
//! Every rotation consumes the freshly built node that violates the balance invariant and
//! returns its replacement. Children that are still shared with an older version are cloned
//! (key plus two reference bumps) rather than modified; children that are uniquely owned are
//! unwrapped and reused.

use alloc::sync::Arc;

use tracing::trace;

use super::node::{Link, Node};

fn take_child<K: Clone>(child: Link<K>, op: &'static str) -> Node<K> {
    let Some(child) = child else {
        panic!("`{op}()` - pivot child is absent!");
    };
    Arc::unwrap_or_clone(child)
}

/// Left-Left repair: the left child becomes the subtree root.
pub(crate) fn rotate_right<K: Clone>(y: Node<K>) -> Node<K> {
    let (y_key, y_left, y_right) = y.into_parts();
    let (x_key, x_left, x_right) = take_child(y_left, "rotate_right").into_parts();

    let y = Node::new(y_key, x_right, y_right);
    Node::new(x_key, x_left, Some(Arc::new(y)))
}

/// Right-Right repair: the right child becomes the subtree root.
pub(crate) fn rotate_left<K: Clone>(x: Node<K>) -> Node<K> {
    let (x_key, x_left, x_right) = x.into_parts();
    let (y_key, y_left, y_right) = take_child(x_right, "rotate_left").into_parts();

    let x = Node::new(x_key, x_left, y_left);
    Node::new(y_key, Some(Arc::new(x)), y_right)
}

/// Left-Right repair.
pub(crate) fn rotate_left_right<K: Clone>(node: Node<K>) -> Node<K> {
    let (key, left, right) = node.into_parts();
    let left = rotate_left(take_child(left, "rotate_left_right"));
    rotate_right(Node::new(key, Some(Arc::new(left)), right))
}

/// Right-Left repair.
pub(crate) fn rotate_right_left<K: Clone>(node: Node<K>) -> Node<K> {
    let (key, left, right) = node.into_parts();
    let right = rotate_right(take_child(right, "rotate_right_left"));
    rotate_left(Node::new(key, left, Some(Arc::new(right))))
}

/// Restores balance after an insertion, using the inserted key to pick the case.
///
/// Only the subtree that received `key` can have grown, so at most one case applies.
pub(crate) fn rebalance_insert<K: Clone + Ord>(node: Node<K>, key: &K) -> Node<K> {
    let bf = node.balance_factor();
    if bf > 1 {
        let left_key = node.left().as_ref().map(|left| left.key());
        if left_key.is_some_and(|left_key| key < left_key) {
            trace!(bf, "left-left rotation");
            rotate_right(node)
        } else {
            trace!(bf, "left-right rotation");
            rotate_left_right(node)
        }
    } else if bf < -1 {
        let right_key = node.right().as_ref().map(|right| right.key());
        if right_key.is_some_and(|right_key| key > right_key) {
            trace!(bf, "right-right rotation");
            rotate_left(node)
        } else {
            trace!(bf, "right-left rotation");
            rotate_right_left(node)
        }
    } else {
        node
    }
}

/// Restores balance after a removal, using the taller child's balance factor to pick the case.
pub(crate) fn rebalance<K: Clone>(node: Node<K>) -> Node<K> {
    let bf = node.balance_factor();
    if bf > 1 {
        let child_bf = node.left().as_ref().map_or(0, |left| left.balance_factor());
        if child_bf >= 0 {
            trace!(bf, child_bf, "left-left rotation");
            rotate_right(node)
        } else {
            trace!(bf, child_bf, "left-right rotation");
            rotate_left_right(node)
        }
    } else if bf < -1 {
        let child_bf = node.right().as_ref().map_or(0, |right| right.balance_factor());
        if child_bf <= 0 {
            trace!(bf, child_bf, "right-right rotation");
            rotate_left(node)
        } else {
            trace!(bf, child_bf, "right-left rotation");
            rotate_right_left(node)
        }
    } else {
        node
    }
}
