//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! tf-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `FEEDBACK_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Schema migrations live in `crates/server/migrations/` and are embedded in
//! the server library. The session table belongs to the session store and is
//! created by it.

use tower_sessions_sqlx_store::PostgresStore;

use super::{CommandError, connect};

/// Run schema migrations, then create the session store's table.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running schema migrations...");
    true_feedback_server::MIGRATOR.run(&pool).await?;

    tracing::info!("Creating session store table...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
