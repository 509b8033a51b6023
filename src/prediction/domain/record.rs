//! Persisted prediction records and their identifiers.

use super::{CropConditions, YieldInterpretation, interpret_yield};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Store-assigned identifier for a prediction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PredictionId(i32);

impl PredictionId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PredictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Predicted yield rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PredictedYield(f64);

impl PredictedYield {
    /// Rounds a raw model output to two decimal places.
    ///
    /// Rounding goes through the correctly rounded decimal rendering, so
    /// half-cent inputs such as 2.675 follow their binary value (2.67) and
    /// large finite outputs stay finite.
    #[must_use]
    pub fn from_raw(raw: f64) -> Self {
        Self(format!("{raw:.2}").parse().unwrap_or(raw))
    }

    /// Returns the rounded value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the tier, message and tip for this yield.
    #[must_use]
    pub fn interpretation(self) -> YieldInterpretation {
        interpret_yield(self.0)
    }
}

impl fmt::Display for PredictedYield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Prediction awaiting persistence; the store assigns id and timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewPrediction {
    /// Submitted growing conditions.
    pub conditions: CropConditions,
    /// Rounded model output.
    pub predicted_yield: PredictedYield,
}

impl NewPrediction {
    /// Pairs validated conditions with the model output.
    #[must_use]
    pub const fn new(conditions: CropConditions, predicted_yield: PredictedYield) -> Self {
        Self {
            conditions,
            predicted_yield,
        }
    }
}

/// Immutable prediction record as stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRecord {
    id: PredictionId,
    #[serde(flatten)]
    conditions: CropConditions,
    predicted_yield: PredictedYield,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistedPredictionData {
    /// Store-assigned identifier.
    pub id: PredictionId,
    /// Stored growing conditions.
    pub conditions: CropConditions,
    /// Stored yield.
    pub predicted_yield: PredictedYield,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    /// Reconstructs a record from persisted values.
    #[must_use]
    pub const fn from_persisted(data: PersistedPredictionData) -> Self {
        Self {
            id: data.id,
            conditions: data.conditions,
            predicted_yield: data.predicted_yield,
            created_at: data.created_at,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> PredictionId {
        self.id
    }

    /// Returns the submitted growing conditions.
    #[must_use]
    pub const fn conditions(&self) -> &CropConditions {
        &self.conditions
    }

    /// Returns the stored yield.
    #[must_use]
    pub const fn predicted_yield(&self) -> PredictedYield {
        self.predicted_yield
    }

    /// Returns the insertion timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
