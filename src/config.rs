//! Command-line and environment configuration.
//!
//! Every flag can also be supplied through a `YIELDCAST_*` environment
//! variable, which the binary may load from a `.env` file.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

/// Crop yield prediction server.
#[derive(Debug, Parser)]
#[command(name = "yieldcast")]
#[command(about = "Serves a crop yield model and records every prediction")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the prediction UI and API.
    Serve(ServeArgs),

    /// Create the predictions table if it does not exist.
    InitDb(DatabaseArgs),
}

/// Database connection settings.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// `SQLite` database path, or `:memory:` for a transient store.
    #[arg(long, env = "YIELDCAST_DATABASE_URL", default_value = "predictions.db")]
    pub database_url: String,

    /// Maximum number of pooled connections.
    #[arg(long, env = "YIELDCAST_POOL_SIZE", default_value_t = 4)]
    pub pool_size: u32,
}

/// Settings for the `serve` command.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Database connection settings.
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Path to the JSON model artefact.
    #[arg(long, env = "YIELDCAST_MODEL_PATH", default_value = "crop_yield_model.json")]
    pub model_path: Utf8PathBuf,

    /// Socket address to listen on.
    #[arg(long, env = "YIELDCAST_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,
}

impl Cli {
    /// Returns the default log filter directive for the selected verbosity.
    #[must_use]
    pub const fn default_log_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
