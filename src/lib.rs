//! A persistent, order-statistic AVL tree for Rust.
//!
//! This crate provides [`PersistentAvl`], an immutable ordered set where every insert or remove
//! returns a new tree that shares all untouched subtrees with the old one, and [`VersionTable`],
//! an append-only history mapping [`VersionId`]s to such trees.
//!
//! Each node caches its height and subtree size, giving O(log n):
//!
//! - [`rank`](PersistentAvl::rank) / [`rank_of`](PersistentAvl::rank_of) - the one-based position of a key
//! - [`select`](PersistentAvl::select) / [`kth_largest`](PersistentAvl::kth_largest) - the key at a position
//! - [`count_in_range`](PersistentAvl::count_in_range) - the number of keys in `[min, max]`
//! - [`closest`](PersistentAvl::closest) - the nearest key to a target
//!
//! # Example
//!
//! ```
//! use persistent_avl::VersionTable;
//!
//! let mut table = VersionTable::new();
//! let mut v = table.empty_version();
//! for key in [50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45] {
//!     v = table.insert(v, key)?;
//! }
//!
//! assert!(table.is_balanced(v)?);
//! assert_eq!(table.range_query(v, &30, &60)?, [&30, &35, &40, &45, &50, &60]);
//! assert_eq!(table.select(v, 1)?, &10);
//! assert_eq!(table.select(v, 11)?, &80);
//!
//! // Branch twice from the same base; the base is untouched.
//! let left = table.insert(v, 15)?;
//! let right = table.insert(v, 36)?;
//! assert_eq!(table.size(left)?, 12);
//! assert_eq!(table.size(right)?, 12);
//! assert_eq!(table.size(v)?, 11);
//! # Ok::<(), persistent_avl::Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Structural sharing** - Versions share nodes through `Arc`; cloning a tree is O(1)
//! - **Thread-safe reads** - Nodes are immutable, so published trees are `Send + Sync`
//!
//! # Implementation
//!
//! Nodes are never modified. Insertion and removal rebuild the nodes on the search path,
//! rebalance each rebuilt node with one of the four AVL rotations, and leave every other
//! subtree shared with the previous version.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod persistent_avl;
pub mod version_table;

pub use error::{Error, Result};
pub use order_statistic::{Distance, Rank};
pub use persistent_avl::PersistentAvl;
pub use raw::Violation;
pub use version_table::{Version, VersionId, VersionTable};
