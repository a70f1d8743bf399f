//! Error types for version table operations.
//!
//! Single-version reads on [`PersistentAvl`](crate::PersistentAvl) report absence through
//! `Option`; the [`VersionTable`](crate::VersionTable) boundary turns the same conditions into
//! an [`Error`] so callers can propagate them with `?`.

use thiserror::Error;

use crate::VersionId;

/// Result type for version table operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by [`VersionTable`](crate::VersionTable).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The version id was never issued by this table.
    #[error("invalid version: {version} (versions issued: {count})")]
    InvalidVersion {
        /// The requested version.
        version: VersionId,
        /// Number of versions the table holds.
        count: usize,
    },

    /// A one-based rank fell outside `1..=len`.
    #[error("rank {k} out of range for tree of size {len}")]
    OutOfRange {
        /// The requested rank.
        k: usize,
        /// Number of keys in the version.
        len: usize,
    },

    /// A rank window `k..=j` was empty or fell outside `1..=len`.
    #[error("rank window {k}..={j} out of range for tree of size {len}")]
    InvalidRankRange {
        /// First rank of the window.
        k: usize,
        /// Last rank of the window.
        j: usize,
        /// Number of keys in the version.
        len: usize,
    },

    /// The key is not present in the version.
    #[error("key not found")]
    KeyNotFound,

    /// The version holds no keys.
    #[error("tree is empty")]
    EmptyTree,
}

impl Error {
    /// Creates a new invalid version error.
    pub(crate) fn invalid_version(version: VersionId, count: usize) -> Self {
        Self::InvalidVersion { version, count }
    }

    /// Creates a new out of range error.
    pub(crate) fn out_of_range(k: usize, len: usize) -> Self {
        Self::OutOfRange { k, len }
    }
}
