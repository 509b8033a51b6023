//! Port for the externally trained yield model.

use crate::prediction::domain::FeatureVector;
use serde::Serialize;
use thiserror::Error;

/// Identity of a loaded model artefact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    /// Model name declared by the artefact.
    pub name: String,
    /// Hex-encoded SHA-256 digest of the artefact bytes, when known.
    pub fingerprint: Option<String>,
}

/// Pre-trained regression model scoring one feature vector at a time.
///
/// Models are loaded once at start-up and shared read-only between
/// requests.
#[cfg_attr(test, mockall::automock)]
pub trait YieldModel: Send + Sync {
    /// Returns the identity of the loaded artefact.
    fn descriptor(&self) -> ModelDescriptor;

    /// Scores a feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when inference fails or produces a value that
    /// is not finite.
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

/// Errors raised while scoring a feature vector.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// The model produced NaN or an infinite value.
    #[error("model produced a non-finite prediction: {0}")]
    NonFinite(f64),

    /// The model failed to score the input.
    #[error("model inference failed: {0}")]
    Inference(String),
}
