//! Error types for backend operations.

use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors raised by a host storage facility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The facility does not exist in this environment, or access to it is
    /// denied (for example by privacy settings).
    #[error("storage facility unavailable: {0}")]
    Unavailable(String),

    /// A write did not fit in the remaining quota.
    #[error("storage quota exceeded while writing {key:?}")]
    QuotaExceeded {
        /// Key that was being written.
        key: String,
    },

    /// Any other failure reported by the host.
    #[error("host error: {0}")]
    Host(String),
}

impl BackendError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a host error.
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }

    /// Returns `true` for errors meaning "this facility cannot be used here".
    ///
    /// Capability probes report such failures as "unsupported"; every other
    /// error is an environment anomaly and is propagated.
    pub fn is_feature_absent(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::QuotaExceeded { .. })
    }
}
