//! Domain model for crop yield predictions.
//!
//! Covers validation of submitted growing conditions, the fixed-order
//! feature encoding, yield tier interpretation and the immutable prediction
//! record. Nothing here touches storage or the network.

mod category;
mod conditions;
mod error;
mod features;
mod record;
mod tier;

pub use category::{Categorical, Crop, Region, SoilType, Weather};
pub use conditions::{CropConditions, PredictionForm};
pub use error::PredictionDomainError;
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use record::{
    NewPrediction, PersistedPredictionData, PredictedYield, PredictionId, PredictionRecord,
};
pub use tier::{YieldInterpretation, YieldTier, interpret_yield};
