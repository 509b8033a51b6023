//! `SQLite` repository implementation for prediction storage.

use super::{
    models::{NewPredictionRow, PredictionRow},
    pool::PredictionSqlitePool,
    schema::predictions,
};
use crate::prediction::{
    domain::{
        Categorical, Crop, CropConditions, NewPrediction, PersistedPredictionData,
        PredictedYield, PredictionDomainError, PredictionId, PredictionRecord, Region, SoilType,
        Weather,
    },
    ports::{PredictionRepository, PredictionRepositoryError, PredictionRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::{debug, instrument};

impl From<DieselError> for PredictionRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `SQLite`-backed prediction repository.
#[derive(Clone)]
pub struct SqlitePredictionRepository {
    pool: PredictionSqlitePool,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl SqlitePredictionRepository {
    /// Creates a repository stamped by the system clock.
    #[must_use]
    pub fn new(pool: PredictionSqlitePool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Creates a repository stamped by the given clock.
    #[must_use]
    pub fn with_clock(pool: PredictionSqlitePool, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PredictionRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> PredictionRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PredictionRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PredictionRepositoryError::persistence)?
    }
}

impl std::fmt::Debug for SqlitePredictionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePredictionRepository")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PredictionRepository for SqlitePredictionRepository {
    #[instrument(skip_all)]
    async fn insert(
        &self,
        prediction: &NewPrediction,
    ) -> PredictionRepositoryResult<PredictionRecord> {
        let prediction = *prediction;
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|tx| {
                insert_row(tx, &to_new_row(&prediction, clock.utc().naive_utc()))
            })
        })
        .await
    }

    #[instrument(skip_all)]
    async fn list_all(&self) -> PredictionRepositoryResult<Vec<PredictionRecord>> {
        self.run_blocking(load_newest_first).await
    }

    #[instrument(skip_all)]
    async fn record_and_list(
        &self,
        prediction: &NewPrediction,
    ) -> PredictionRepositoryResult<(PredictionRecord, Vec<PredictionRecord>)> {
        let prediction = *prediction;
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|tx| {
                let record = insert_row(tx, &to_new_row(&prediction, clock.utc().naive_utc()))?;
                let history = load_newest_first(tx)?;
                Ok((record, history))
            })
        })
        .await
    }
}

/// Callers stamp `created_at` inside the write transaction so that insertion
/// order and `created_at` order agree.
fn insert_row(
    connection: &mut SqliteConnection,
    row: &NewPredictionRow<'_>,
) -> PredictionRepositoryResult<PredictionRecord> {
    let stored = diesel::insert_into(predictions::table)
        .values(row)
        .returning(PredictionRow::as_returning())
        .get_result::<PredictionRow>(connection)?;
    debug!(id = stored.id, "stored prediction");
    row_to_record(stored)
}

fn load_newest_first(
    connection: &mut SqliteConnection,
) -> PredictionRepositoryResult<Vec<PredictionRecord>> {
    predictions::table
        .select(PredictionRow::as_select())
        .order((predictions::created_at.desc(), predictions::id.desc()))
        .load::<PredictionRow>(connection)?
        .into_iter()
        .map(row_to_record)
        .collect()
}

fn to_new_row(
    prediction: &NewPrediction,
    created_at: chrono::NaiveDateTime,
) -> NewPredictionRow<'static> {
    let conditions = &prediction.conditions;
    NewPredictionRow {
        rainfall_mm: conditions.rainfall_mm,
        temperature_celsius: conditions.temperature_celsius,
        days_to_harvest: conditions.days_to_harvest,
        fertilizer_used: i32::from(conditions.fertilizer_used),
        irrigation_used: i32::from(conditions.irrigation_used),
        region: conditions.region.as_str(),
        soil_type: conditions.soil_type.as_str(),
        crop: conditions.crop.as_str(),
        weather: conditions.weather.as_str(),
        predicted_yield: prediction.predicted_yield.value(),
        created_at,
    }
}

fn row_to_record(row: PredictionRow) -> PredictionRepositoryResult<PredictionRecord> {
    let PredictionRow {
        id,
        rainfall_mm,
        temperature_celsius,
        days_to_harvest,
        fertilizer_used,
        irrigation_used,
        region,
        soil_type,
        crop,
        weather,
        predicted_yield,
        created_at,
    } = row;

    let corrupt = |err: PredictionDomainError| PredictionRepositoryError::CorruptRecord {
        id,
        reason: err.to_string(),
    };
    let conditions = CropConditions {
        rainfall_mm,
        temperature_celsius,
        days_to_harvest,
        fertilizer_used: flag_from_column(id, "fertilizer_used", fertilizer_used)?,
        irrigation_used: flag_from_column(id, "irrigation_used", irrigation_used)?,
        region: Region::parse(&region).map_err(corrupt)?,
        soil_type: SoilType::parse(&soil_type).map_err(corrupt)?,
        crop: Crop::parse(&crop).map_err(corrupt)?,
        weather: Weather::parse(&weather).map_err(corrupt)?,
    };

    Ok(PredictionRecord::from_persisted(PersistedPredictionData {
        id: PredictionId::new(id),
        conditions,
        predicted_yield: PredictedYield::from_raw(predicted_yield),
        created_at: created_at.and_utc(),
    }))
}

fn flag_from_column(id: i32, column: &str, value: i32) -> PredictionRepositoryResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(PredictionRepositoryError::CorruptRecord {
            id,
            reason: format!("{column} holds {other}, expected 0 or 1"),
        }),
    }
}
