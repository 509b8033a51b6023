//! In-memory adapters for prediction persistence.

mod repository;

pub use repository::InMemoryPredictionRepository;
