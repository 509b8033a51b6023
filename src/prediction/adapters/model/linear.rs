//! Linear regression model loaded from a JSON artefact.
//!
//! The artefact names each coefficient by feature, so a reordered or
//! incomplete export is rejected at load time instead of silently scoring
//! the wrong columns:
//!
//! ```json
//! {
//!   "model_name": "crop_yield_linear",
//!   "intercept": 0.42,
//!   "coefficients": { "Rainfall_mm": 0.0049, "Temperature_Celsius": 0.02, "...": 0.0 }
//! }
//! ```

use crate::prediction::{
    domain::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector},
    ports::{ModelDescriptor, ModelError, YieldModel},
};
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a model artefact.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// The artefact path has no file name component.
    #[error("model path '{0}' does not name a file")]
    InvalidPath(String),

    /// The artefact could not be read.
    #[error("failed to read model artefact: {0}")]
    Io(#[from] std::io::Error),

    /// The artefact is not valid JSON for a linear model.
    #[error("malformed model artefact: {0}")]
    Parse(#[from] serde_json::Error),

    /// A schema feature has no coefficient.
    #[error("model artefact has no coefficient for feature '{0}'")]
    MissingFeature(&'static str),

    /// The artefact names a feature outside the schema.
    #[error("model artefact names unknown feature '{0}'")]
    UnknownFeature(String),

    /// A coefficient or the intercept is NaN or infinite.
    #[error("model artefact holds a non-finite value for '{0}'")]
    NonFiniteWeight(String),
}

#[derive(Debug, Deserialize)]
struct LinearArtefact {
    model_name: String,
    intercept: f64,
    coefficients: BTreeMap<String, f64>,
}

/// Linear regression over the fixed feature schema.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearYieldModel {
    name: String,
    intercept: f64,
    weights: [f64; FEATURE_COUNT],
    fingerprint: String,
}

impl LinearYieldModel {
    /// Loads and validates an artefact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError`] when the file cannot be read or fails
    /// validation.
    pub fn load(path: &Utf8Path) -> Result<Self, ModelLoadError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| ModelLoadError::InvalidPath(path.to_string()))?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));

        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        let bytes = dir.read(file_name)?;
        let model = Self::from_slice(&bytes)?;
        info!(
            model = %model.name,
            fingerprint = %model.fingerprint,
            path = %path,
            "loaded yield model"
        );
        Ok(model)
    }

    /// Parses and validates an artefact held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError`] when the bytes are not a valid artefact.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let artefact: LinearArtefact = serde_json::from_slice(bytes)?;
        let LinearArtefact {
            model_name,
            intercept,
            mut coefficients,
        } = artefact;

        if !intercept.is_finite() {
            return Err(ModelLoadError::NonFiniteWeight("intercept".to_owned()));
        }

        let mut weights = [0.0; FEATURE_COUNT];
        for (slot, name) in weights.iter_mut().zip(FEATURE_NAMES) {
            let weight = coefficients
                .remove(name)
                .ok_or(ModelLoadError::MissingFeature(name))?;
            if !weight.is_finite() {
                return Err(ModelLoadError::NonFiniteWeight(name.to_owned()));
            }
            *slot = weight;
        }
        if let Some(unknown) = coefficients.into_keys().next() {
            return Err(ModelLoadError::UnknownFeature(unknown));
        }

        Ok(Self {
            name: model_name,
            intercept,
            weights,
            fingerprint: format!("{:x}", Sha256::digest(bytes)),
        })
    }

    /// Returns the coefficient for a feature.
    #[must_use]
    pub fn coefficient(&self, feature: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|name| *name == feature)
            .and_then(|index| self.weights.get(index).copied())
    }

    /// Returns the intercept term.
    #[must_use]
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl YieldModel for LinearYieldModel {
    fn descriptor(&self) -> ModelDescriptor {
        ModelDescriptor {
            name: self.name.clone(),
            fingerprint: Some(self.fingerprint.clone()),
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "Scoring a linear model is a weighted sum"
    )]
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let score = self
            .weights
            .iter()
            .zip(features.values())
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value);
        if score.is_finite() {
            Ok(score)
        } else {
            Err(ModelError::NonFinite(score))
        }
    }
}
