//! Port contracts for prediction serving.
//!
//! Ports define infrastructure-agnostic interfaces used by the prediction
//! service: the append-only store and the external model.

pub mod model;
pub mod repository;

pub use model::{ModelDescriptor, ModelError, YieldModel};
pub use repository::{PredictionRepository, PredictionRepositoryError, PredictionRepositoryResult};

#[cfg(test)]
pub use model::MockYieldModel;
#[cfg(test)]
pub use repository::MockPredictionRepository;
