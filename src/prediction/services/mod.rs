//! Application services for prediction serving.

mod prediction;

pub use prediction::{
    HistorySnapshot, PredictionOutcome, PredictionService, PredictionServiceError,
    PredictionServiceResult, ScoredPrediction, SubmissionReport, VisualizationReport,
};
