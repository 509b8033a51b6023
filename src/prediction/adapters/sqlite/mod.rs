//! `SQLite` adapters for prediction persistence.

mod models;
mod pool;
mod repository;
mod schema;

pub use pool::{CREATE_PREDICTIONS_SQL, PredictionSqlitePool, apply_schema, build_pool};
pub use repository::SqlitePredictionRepository;
