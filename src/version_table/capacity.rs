use alloc::vec::Vec;

use super::VersionTable;
use crate::PersistentAvl;

impl<K> VersionTable<K> {
    /// Creates a table holding only the empty version, with room for at least `capacity`
    /// versions before the history reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_avl::VersionTable;
    ///
    /// let table: VersionTable<i32> = VersionTable::with_capacity(16);
    /// assert!(table.capacity() >= 16);
    /// assert_eq!(table.version_count(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut versions = Vec::with_capacity(capacity.max(1));
        versions.push(PersistentAvl::new());
        Self { versions }
    }

    /// Returns how many versions the history can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.versions.capacity()
    }

    /// Reserves room for at least `additional` more versions.
    pub fn reserve(&mut self, additional: usize) {
        self.versions.reserve(additional);
    }

    /// Releases unused history capacity.
    pub fn shrink_to_fit(&mut self) {
        self.versions.shrink_to_fit();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn reserve_grows_capacity() {
        let mut table: VersionTable<u8> = VersionTable::with_capacity(0);
        assert!(table.capacity() >= 1);
        table.reserve(32);
        assert!(table.capacity() >= 33);
        table.shrink_to_fit();
        assert!(table.capacity() >= 1);
    }
}
