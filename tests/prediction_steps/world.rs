//! Shared world state for prediction flow BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{SteppingClock, wheat_model};
use rstest::fixture;
use yieldcast::prediction::{
    adapters::{memory::InMemoryPredictionRepository, model::LinearYieldModel},
    domain::PredictionForm,
    services::{PredictionService, SubmissionReport},
};

/// Service type used by the BDD world.
pub type TestPredictionService = PredictionService<InMemoryPredictionRepository, LinearYieldModel>;

/// Scenario world for prediction behaviour tests.
pub struct PredictionWorld {
    /// The prediction service under test.
    pub service: TestPredictionService,
    /// Form to submit in the next `When` step.
    pub form: PredictionForm,
    /// Report from the last submission.
    pub last_report: Option<SubmissionReport>,
}

impl PredictionWorld {
    /// Creates a world with an empty store and an empty form.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryPredictionRepository::with_clock(Arc::new(
            SteppingClock::new(),
        )));
        Self {
            service: PredictionService::new(repository, Arc::new(wheat_model())),
            form: PredictionForm::default(),
            last_report: None,
        }
    }
}

impl Default for PredictionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PredictionWorld {
    PredictionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
