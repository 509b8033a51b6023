//! In-memory repository for prediction tests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::prediction::{
    domain::{NewPrediction, PersistedPredictionData, PredictionId, PredictionRecord},
    ports::{PredictionRepository, PredictionRepositoryError, PredictionRepositoryResult},
};

/// Thread-safe in-memory prediction repository.
#[derive(Clone)]
pub struct InMemoryPredictionRepository {
    state: Arc<RwLock<InMemoryPredictionState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct InMemoryPredictionState {
    records: Vec<PredictionRecord>,
    last_id: i32,
}

impl InMemoryPredictionRepository {
    /// Creates an empty repository stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty repository stamped by the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryPredictionState::default())),
            clock,
        }
    }

    fn read(&self) -> PredictionRepositoryResult<RwLockReadGuard<'_, InMemoryPredictionState>> {
        self.state.read().map_err(|err| {
            PredictionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> PredictionRepositoryResult<RwLockWriteGuard<'_, InMemoryPredictionState>> {
        self.state.write().map_err(|err| {
            PredictionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl Default for InMemoryPredictionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryPredictionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPredictionRepository")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn append(
    state: &mut InMemoryPredictionState,
    prediction: &NewPrediction,
    clock: &dyn Clock,
) -> PredictionRepositoryResult<PredictionRecord> {
    let id = state
        .last_id
        .checked_add(1)
        .ok_or(PredictionRepositoryError::IdentifierExhausted)?;
    let record = PredictionRecord::from_persisted(PersistedPredictionData {
        id: PredictionId::new(id),
        conditions: prediction.conditions,
        predicted_yield: prediction.predicted_yield,
        created_at: clock.utc(),
    });
    state.last_id = id;
    state.records.push(record);
    Ok(record)
}

fn newest_first(state: &InMemoryPredictionState) -> Vec<PredictionRecord> {
    let mut records = state.records.clone();
    records.sort_by(|left, right| {
        right
            .created_at()
            .cmp(&left.created_at())
            .then_with(|| right.id().cmp(&left.id()))
    });
    records
}

#[async_trait]
impl PredictionRepository for InMemoryPredictionRepository {
    async fn insert(
        &self,
        prediction: &NewPrediction,
    ) -> PredictionRepositoryResult<PredictionRecord> {
        let mut state = self.write()?;
        append(&mut state, prediction, &*self.clock)
    }

    async fn list_all(&self) -> PredictionRepositoryResult<Vec<PredictionRecord>> {
        let state = self.read()?;
        Ok(newest_first(&state))
    }

    async fn record_and_list(
        &self,
        prediction: &NewPrediction,
    ) -> PredictionRepositoryResult<(PredictionRecord, Vec<PredictionRecord>)> {
        let mut state = self.write()?;
        let record = append(&mut state, prediction, &*self.clock)?;
        Ok((record, newest_first(&state)))
    }
}
