//! Connection pooling and schema bootstrap for the `SQLite` store.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::sqlite::SqliteConnection;
use std::time::Duration;
use tracing::{debug, info};

use crate::prediction::ports::{PredictionRepositoryError, PredictionRepositoryResult};

/// `SQLite` connection pool type used by prediction adapters.
pub type PredictionSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Schema for the `predictions` table.
pub const CREATE_PREDICTIONS_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_predictions/up.sql");

const IN_MEMORY_URL: &str = ":memory:";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-connection pragmas applied whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas {
    busy_timeout: Duration,
    write_ahead_log: bool,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let mut pragmas = format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        );
        if self.write_ahead_log {
            pragmas.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        connection
            .batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a connection pool for the database at `database_url`.
///
/// A `:memory:` URL is pinned to a single long-lived connection, since every
/// `SQLite` in-memory connection is its own database.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PredictionSqlitePool, PoolError> {
    let in_memory = database_url == IN_MEMORY_URL;
    let pragmas = ConnectionPragmas {
        busy_timeout: DEFAULT_BUSY_TIMEOUT,
        write_ahead_log: !in_memory,
    };
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let builder = Pool::builder().connection_customizer(Box::new(pragmas));
    let builder = if in_memory {
        builder.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        builder.max_size(max_size.max(1))
    };

    debug!(database_url, in_memory, "opening sqlite connection pool");
    builder.build(manager)
}

/// Creates the `predictions` table and its index when they do not exist.
///
/// # Errors
///
/// Returns [`PredictionRepositoryError::Persistence`] when a connection
/// cannot be acquired or the schema statements fail.
pub fn apply_schema(pool: &PredictionSqlitePool) -> PredictionRepositoryResult<()> {
    let mut connection = pool.get().map_err(PredictionRepositoryError::persistence)?;
    connection
        .batch_execute(CREATE_PREDICTIONS_SQL)
        .map_err(PredictionRepositoryError::persistence)?;
    info!("prediction schema is up to date");
    Ok(())
}
