use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::ops::AddAssign;

use tracing::debug;

use crate::error::{Error, Result};
use crate::{Distance, PersistentAvl};

mod capacity;

/// Identifies one version in a [`VersionTable`].
///
/// Ids are issued in order starting from [`VersionId::EMPTY`], the empty tree every table
/// begins with.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VersionId(pub usize);

impl VersionId {
    /// The version every table starts with.
    pub const EMPTY: Self = Self(0);
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A snapshot returned by [`VersionTable::get_version`] and [`VersionTable::latest_version`].
///
/// The tree is a cheap handle sharing nodes with the table, so it stays valid after the table
/// moves on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version<K> {
    /// The id this snapshot was registered under.
    pub id: VersionId,
    /// The keys of the version.
    pub tree: PersistentAvl<K>,
}

/// An append-only history of [`PersistentAvl`] trees.
///
/// Every [`insert`](Self::insert) and [`delete`](Self::delete) names a base version and appends a
/// new one; the base is never altered, so several versions can branch from the same base.
/// Read methods take a version id and never append.
///
/// Mutation requires `&mut self`, which gives each table a single writer. Published versions
/// can be read concurrently through [`tree`](Self::tree) or [`get_version`](Self::get_version).
///
/// # Examples
///
/// ```
/// use persistent_avl::VersionTable;
///
/// let mut table = VersionTable::new();
/// let v0 = table.empty_version();
/// let v1 = table.insert(v0, 50)?;
/// let v2 = table.insert(v1, 30)?;
/// let v3 = table.delete(v2, &50)?;
///
/// assert_eq!(table.size(v2)?, 2);
/// assert!(table.search(v2, &50)?);
/// assert!(!table.search(v3, &50)?);
/// assert_eq!(table.latest_version().id, v3);
/// # Ok::<(), persistent_avl::Error>(())
/// ```
pub struct VersionTable<K> {
    versions: Vec<PersistentAvl<K>>,
}

impl<K> VersionTable<K> {
    /// Makes a new table holding only the empty version.
    #[must_use]
    pub fn new() -> Self {
        Self::from_tree(PersistentAvl::new())
    }

    /// Makes a new table whose version 0 is `tree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::{PersistentAvl, VersionId, VersionTable};
    ///
    /// let table = VersionTable::from_tree(PersistentAvl::from([1, 2, 3]));
    /// assert_eq!(table.size(VersionId::EMPTY)?, 3);
    /// # Ok::<(), persistent_avl::Error>(())
    /// ```
    #[must_use]
    pub fn from_tree(tree: PersistentAvl<K>) -> Self {
        let mut versions = Vec::new();
        versions.push(tree);
        Self { versions }
    }

    /// Returns the id of the initial version.
    #[must_use]
    pub const fn empty_version(&self) -> VersionId {
        VersionId::EMPTY
    }

    /// Returns the number of versions issued so far.
    #[must_use]
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Returns the tree registered under `version`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn tree(&self, version: VersionId) -> Result<&PersistentAvl<K>> {
        self.versions
            .get(version.0)
            .ok_or_else(|| Error::invalid_version(version, self.versions.len()))
    }

    /// Returns a snapshot of `version`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn get_version(&self, version: VersionId) -> Result<Version<K>> {
        let tree = self.tree(version)?.clone();
        Ok(Version { id: version, tree })
    }

    /// Returns a snapshot of the most recently appended version.
    #[must_use]
    pub fn latest_version(&self) -> Version<K> {
        let last = self.versions.len() - 1;
        Version {
            id: VersionId(last),
            tree: self.versions[last].clone(),
        }
    }

    /// Returns the number of keys in `version`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn size(&self, version: VersionId) -> Result<usize> {
        Ok(self.tree(version)?.len())
    }

    /// Returns `true` if every node of `version` satisfies the AVL height invariant.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn is_balanced(&self, version: VersionId) -> Result<bool> {
        Ok(self.tree(version)?.is_balanced())
    }

    fn append(&mut self, base: VersionId, tree: PersistentAvl<K>) -> VersionId {
        let id = VersionId(self.versions.len());
        debug!(
            base = base.0,
            version = id.0,
            size = tree.len(),
            height = tree.height(),
            shared_root = tree.ptr_eq(&self.versions[base.0]),
            "appended version"
        );
        self.versions.push(tree);
        id
    }
}

impl<K: Clone + Ord> VersionTable<K> {
    /// Inserts `key` into `base` and registers the result as a new version.
    ///
    /// A key already present in `base` still produces a new version, sharing `base`'s root.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `base`.
    pub fn insert(&mut self, base: VersionId, key: K) -> Result<VersionId> {
        let tree = self.tree(base)?.insert(key);
        Ok(self.append(base, tree))
    }

    /// Removes `key` from `base` and registers the result as a new version.
    ///
    /// Removing an absent key still produces a new version, sharing `base`'s root.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `base`.
    pub fn delete<Q>(&mut self, base: VersionId, key: &Q) -> Result<VersionId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let tree = self.tree(base)?.remove(key);
        Ok(self.append(base, tree))
    }
}

impl<K: Ord> VersionTable<K> {
    /// Returns `true` if `version` contains `key`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn search<Q>(&self, version: VersionId, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Ok(self.tree(version)?.contains(key))
    }

    /// Returns the one-based rank of `key` in `version`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`, or [`Error::KeyNotFound`] if
    /// `key` is absent. Use [`PersistentAvl::rank`] for the position an absent key would take.
    pub fn rank<Q>(&self, version: VersionId, key: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree(version)?.rank_of(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the key at one-based rank `k` in `version`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`, or [`Error::OutOfRange`]
    /// unless `1 <= k <= size`.
    pub fn select(&self, version: VersionId, k: usize) -> Result<&K> {
        let tree = self.tree(version)?;
        tree.select(k).ok_or_else(|| Error::out_of_range(k, tree.len()))
    }

    /// Returns the `k`-th largest key in `version`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`, or [`Error::OutOfRange`]
    /// unless `1 <= k <= size`.
    pub fn kth_largest(&self, version: VersionId, k: usize) -> Result<&K> {
        let tree = self.tree(version)?;
        tree.kth_largest(k).ok_or_else(|| Error::out_of_range(k, tree.len()))
    }

    /// Returns the keys with ranks `k..=j` in `version`, ascending.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`, or
    /// [`Error::InvalidRankRange`] unless `1 <= k <= j <= size`.
    pub fn kth_to_jth_smallest(&self, version: VersionId, k: usize, j: usize) -> Result<Vec<&K>> {
        let tree = self.tree(version)?;
        tree.kth_to_jth_smallest(k, j).ok_or(Error::InvalidRankRange { k, j, len: tree.len() })
    }

    /// Returns the keys of `version` in `[min, max]`, ascending. Empty if `min > max`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn range_query(&self, version: VersionId, min: &K, max: &K) -> Result<Vec<&K>> {
        Ok(self.tree(version)?.range_query(min, max))
    }

    /// Returns the number of keys of `version` in `[min, max]`. Zero if `min > max`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn count_in_range(&self, version: VersionId, min: &K, max: &K) -> Result<usize> {
        Ok(self.tree(version)?.count_in_range(min, max))
    }

    /// Returns the smallest key of `version` in `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn min_in_range(&self, version: VersionId, min: &K, max: &K) -> Result<Option<&K>> {
        Ok(self.tree(version)?.min_in_range(min, max))
    }

    /// Returns the largest key of `version` in `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn max_in_range(&self, version: VersionId, min: &K, max: &K) -> Result<Option<&K>> {
        Ok(self.tree(version)?.max_in_range(min, max))
    }
}

impl<K: Clone + Ord> VersionTable<K> {
    /// Returns the sum of the keys of `version` in `[min, max]`, accumulated in `S`.
    ///
    /// See [`PersistentAvl::sum_in_range`] for how keys are converted.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`.
    pub fn sum_in_range<S>(&self, version: VersionId, min: &K, max: &K) -> Result<S>
    where
        S: Default + AddAssign + From<K>,
    {
        Ok(self.tree(version)?.sum_in_range(min, max))
    }
}

impl<K: Ord + Distance> VersionTable<K> {
    /// Returns the key of `version` nearest to `target`, preferring the smaller key on a tie.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidVersion`] if the table never issued `version`, or [`Error::EmptyTree`] if
    /// the version holds no keys.
    pub fn closest(&self, version: VersionId, target: &K) -> Result<&K> {
        self.tree(version)?.closest(target).ok_or(Error::EmptyTree)
    }
}

impl<K> Default for VersionTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for VersionTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionTable").field("versions", &self.versions).finish()
    }
}
