//! Service layer orchestrating encode, score, interpret and persist.

use crate::prediction::{
    domain::{
        FeatureVector, NewPrediction, PredictedYield, PredictionDomainError, PredictionForm,
        PredictionRecord, YieldInterpretation,
    },
    ports::{
        ModelDescriptor, ModelError, PredictionRepository, PredictionRepositoryError, YieldModel,
    },
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Service-level errors for prediction operations.
#[derive(Debug, Error)]
pub enum PredictionServiceError {
    /// The submitted form failed validation.
    #[error(transparent)]
    Domain(#[from] PredictionDomainError),
    /// The model could not score the encoded input.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PredictionRepositoryError),
}

/// Result type for prediction service operations.
pub type PredictionServiceResult<T> = Result<T, PredictionServiceError>;

/// A stored prediction together with its tier interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredPrediction {
    /// Persisted record.
    pub record: PredictionRecord,
    /// Tier, message and tip for the record's yield.
    pub interpretation: YieldInterpretation,
}

/// Result of a successful prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    /// The new prediction.
    pub scored: ScoredPrediction,
    /// Full history, newest first, including the new prediction.
    pub history: Vec<PredictionRecord>,
}

/// Best-effort result of a form submission.
///
/// History is always populated when the store is readable, even when the
/// prediction itself failed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionReport {
    /// The new prediction, when scoring and persistence succeeded.
    pub scored: Option<ScoredPrediction>,
    /// History, newest first.
    pub history: Vec<PredictionRecord>,
    /// Error messages to surface to the caller.
    pub errors: Vec<String>,
}

/// Prediction history with its size, as served to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySnapshot {
    /// Number of stored predictions.
    pub total_predictions: usize,
    /// History, newest first.
    pub history: Vec<PredictionRecord>,
}

/// History annotated with the latest prediction's interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationReport {
    /// History, newest first.
    pub history: Vec<PredictionRecord>,
    /// Interpretation of the newest record, if any.
    pub latest: Option<YieldInterpretation>,
}

/// Prediction orchestration service.
pub struct PredictionService<R, M>
where
    R: PredictionRepository,
    M: YieldModel,
{
    repository: Arc<R>,
    model: Arc<M>,
}

impl<R, M> Clone for PredictionService<R, M>
where
    R: PredictionRepository,
    M: YieldModel,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            model: Arc::clone(&self.model),
        }
    }
}

impl<R, M> PredictionService<R, M>
where
    R: PredictionRepository,
    M: YieldModel,
{
    /// Creates a new prediction service.
    #[must_use]
    pub const fn new(repository: Arc<R>, model: Arc<M>) -> Self {
        Self { repository, model }
    }

    /// Returns the identity of the loaded model.
    #[must_use]
    pub fn model_descriptor(&self) -> ModelDescriptor {
        self.model.descriptor()
    }

    /// Scores a submitted form, persists it and returns the refreshed
    /// history.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionServiceError::Domain`] for invalid input,
    /// [`PredictionServiceError::Model`] when scoring fails and
    /// [`PredictionServiceError::Repository`] when persistence fails.
    #[instrument(skip_all)]
    pub async fn predict(
        &self,
        form: &PredictionForm,
    ) -> PredictionServiceResult<PredictionOutcome> {
        let conditions = form.parse()?;
        let features = FeatureVector::encode(&conditions);
        let raw = self.model.predict(&features)?;
        if !raw.is_finite() {
            return Err(ModelError::NonFinite(raw).into());
        }
        let predicted_yield = PredictedYield::from_raw(raw);
        debug!(raw, rounded = predicted_yield.value(), "scored prediction");

        let (record, history) = self
            .repository
            .record_and_list(&NewPrediction::new(conditions, predicted_yield))
            .await?;
        let interpretation = predicted_yield.interpretation();
        info!(
            id = %record.id(),
            predicted_yield = %predicted_yield,
            tier = interpretation.tier.as_str(),
            "prediction recorded"
        );

        Ok(PredictionOutcome {
            scored: ScoredPrediction {
                record,
                interpretation,
            },
            history,
        })
    }

    /// Handles a form submission without ever hiding stored history.
    ///
    /// On failure the error is reported alongside a fresh read of the
    /// history. If that read fails too, both messages are reported with an
    /// empty history.
    pub async fn submit(&self, form: &PredictionForm) -> SubmissionReport {
        match self.predict(form).await {
            Ok(outcome) => SubmissionReport {
                scored: Some(outcome.scored),
                history: outcome.history,
                errors: Vec::new(),
            },
            Err(err) => {
                warn!(error = %err, "prediction request failed");
                self.failed_submission(err.to_string()).await
            }
        }
    }

    /// Reports a submission that failed before or during scoring.
    ///
    /// The message is returned alongside a fresh read of the history. If
    /// that read fails too, both messages are reported with an empty
    /// history.
    pub async fn failed_submission(&self, message: String) -> SubmissionReport {
        let mut errors = vec![message];
        let history = match self.repository.list_all().await {
            Ok(history) => history,
            Err(history_err) => {
                warn!(error = %history_err, "history unavailable after failed prediction");
                errors.push(history_err.to_string());
                Vec::new()
            }
        };
        SubmissionReport {
            scored: None,
            history,
            errors,
        }
    }

    /// Returns every stored prediction, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionServiceError::Repository`] when the store cannot
    /// be read.
    pub async fn history(&self) -> PredictionServiceResult<HistorySnapshot> {
        let history = self.repository.list_all().await?;
        Ok(HistorySnapshot {
            total_predictions: history.len(),
            history,
        })
    }

    /// Returns history annotated with the newest record's interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionServiceError::Repository`] when the store cannot
    /// be read.
    pub async fn visualization(&self) -> PredictionServiceResult<VisualizationReport> {
        let history = self.repository.list_all().await?;
        let latest = history
            .first()
            .map(|record| record.predicted_yield().interpretation());
        Ok(VisualizationReport { history, latest })
    }
}
