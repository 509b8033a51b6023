//! Runs the crop yield prediction server.
//!
//! Usage:
//!
//! ```text
//! yieldcast [--verbose] serve --model-path crop_yield_model.json --bind 127.0.0.1:5000
//! yieldcast init-db --database-url predictions.db
//! ```
//!
//! Flags fall back to `YIELDCAST_*` environment variables, which may be set
//! in a `.env` file. `RUST_LOG` overrides the default log filter.

use clap::Parser;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yieldcast::{
    config::{Cli, Command, DatabaseArgs, ServeArgs},
    prediction::{
        adapters::{
            model::{LinearYieldModel, ModelLoadError},
            sqlite::{PredictionSqlitePool, SqlitePredictionRepository, apply_schema, build_pool},
        },
        ports::PredictionRepositoryError,
        services::PredictionService,
    },
    web::{AppState, Templates, create_router},
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while starting the server.
#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to open database pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to apply schema: {0}")]
    Schema(#[from] PredictionRepositoryError),
    #[error("failed to load model: {0}")]
    Model(#[from] ModelLoadError),
    #[error("failed to compile templates: {0}")]
    Templates(#[from] minijinja::Error),
    #[error("server I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Serve(args) => serve(args).await?,
        Command::InitDb(args) => {
            open_database(&args)?;
        }
    }
    Ok(())
}

fn open_database(args: &DatabaseArgs) -> Result<PredictionSqlitePool, StartupError> {
    let pool = build_pool(&args.database_url, args.pool_size)?;
    apply_schema(&pool)?;
    info!(database_url = %args.database_url, "database ready");
    Ok(pool)
}

async fn serve(args: ServeArgs) -> Result<(), StartupError> {
    let pool = open_database(&args.database)?;
    let model = Arc::new(LinearYieldModel::load(&args.model_path)?);
    let repository = Arc::new(SqlitePredictionRepository::new(pool));
    let service = PredictionService::new(repository, model);
    let templates = Arc::new(Templates::new()?);
    let app = create_router(AppState::new(service, templates));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(address = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
