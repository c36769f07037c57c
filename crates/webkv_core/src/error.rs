//! Error types for the storage facade.

use thiserror::Error;

/// Result type for facade operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in facade operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Neither backend was usable at the last refresh.
    ///
    /// Raised by reads and enumeration. Callers are expected to check
    /// `storage_available()` first.
    #[error("browser storage unavailable as of last refresh")]
    Unavailable,

    /// The selected backend failed.
    #[error("backend error: {0}")]
    Backend(#[from] webkv_storage::BackendError),

    /// A stored key or value could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] webkv_codec::CodecError),
}

impl StorageError {
    /// Returns `true` for [`StorageError::Unavailable`].
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}
