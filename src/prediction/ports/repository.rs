//! Repository port for append-only prediction persistence.

use crate::prediction::domain::{NewPrediction, PredictionRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for prediction repository operations.
pub type PredictionRepositoryResult<T> = Result<T, PredictionRepositoryError>;

/// Append-only prediction store.
///
/// Implementations assign identifiers and creation timestamps, serialize
/// concurrent inserts, and return history newest first (ties broken by
/// descending identifier).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionRepository: Send + Sync {
    /// Persists a prediction and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionRepositoryError::Persistence`] when the underlying
    /// storage fails.
    async fn insert(
        &self,
        prediction: &NewPrediction,
    ) -> PredictionRepositoryResult<PredictionRecord>;

    /// Returns every stored record, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionRepositoryError`] when storage fails or a stored
    /// row cannot be reconstructed.
    async fn list_all(&self) -> PredictionRepositoryResult<Vec<PredictionRecord>>;

    /// Persists a prediction and reads back the full history atomically.
    ///
    /// The returned history contains the new record exactly once and no
    /// concurrent insert can interleave between the write and the read.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionRepositoryError`] when either step fails; the
    /// insert is rolled back in that case.
    async fn record_and_list(
        &self,
        prediction: &NewPrediction,
    ) -> PredictionRepositoryResult<(PredictionRecord, Vec<PredictionRecord>)>;
}

/// Errors returned by prediction repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PredictionRepositoryError {
    /// A stored row holds values outside the domain (for example an unknown
    /// region literal).
    #[error("stored prediction {id} is corrupt: {reason}")]
    CorruptRecord {
        /// Identifier of the offending row.
        id: i32,
        /// Description of the violation.
        reason: String,
    },

    /// The store ran out of identifiers.
    #[error("prediction identifier space exhausted")]
    IdentifierExhausted,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PredictionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
