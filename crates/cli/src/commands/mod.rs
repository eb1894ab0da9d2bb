//! Command implementations.

pub mod migrate;
pub mod user;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use thiserror::Error;

use true_feedback_server::config::{ConfigError, get_database_url};
use true_feedback_server::db::RepositoryError;

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("No user named {0}")]
    UserNotFound(String),
}

/// Connect to the database named by `FEEDBACK_DATABASE_URL` (or `DATABASE_URL`).
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();
    let database_url = get_database_url("FEEDBACK_DATABASE_URL")?;

    tracing::info!("Connecting to database...");
    Ok(PgPool::connect(database_url.expose_secret()).await?)
}
