//! Persistence port for the dedup set.

use crate::transfer::domain::DedupRecord;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dedup store operations.
pub type DedupStoreResult<T> = Result<T, StoreError>;

/// Dedup state persistence contract.
///
/// Implementations assume a single writer; no locking is performed.
#[async_trait]
pub trait DedupStore: Send + Sync {
    /// Loads the persisted record, or an empty one when nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] when persisted content cannot be
    /// parsed. Callers must treat this as fatal: resetting to an empty set
    /// would re-notify every transfer ever seen.
    async fn load(&self) -> DedupStoreResult<DedupRecord>;

    /// Replaces the persisted record wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the record cannot be written.
    async fn save(&self, record: &DedupRecord) -> DedupStoreResult<()>;
}

/// Errors returned by dedup store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Persisted content exists but cannot be parsed.
    #[error("dedup state is corrupt: {reason}")]
    Corrupt {
        /// Parser diagnostic.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("dedup state I/O error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Creates a corruption error from a parser diagnostic.
    #[must_use]
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt {
            reason: reason.into(),
        }
    }
}
