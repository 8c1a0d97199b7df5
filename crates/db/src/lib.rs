//! Storage layer: SQLite pool construction, embedded migrations, row models,
//! and the repository structs.
//!
//! The pool is created once by the process bootstrapper and passed down
//! explicitly; nothing in this crate holds global state.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use alcove_core::error::AuthError;

pub mod config;
pub mod models;
pub mod repositories;

pub use config::StorageConfig;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool for the configured database file.
///
/// The parent directory is created if missing (SQLite will not do that
/// itself). Foreign keys are enabled explicitly; cascading deletes of
/// sessions and recovery keys depend on it.
pub async fn create_pool(config: &StorageConfig) -> Result<DbPool, AuthError> {
    if let Some(dir) = config.database_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .map_err(|e| AuthError::Storage(sqlx::Error::Io(e)))?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Apply the embedded schema migrations. Each migration runs in its own
/// transaction, so a crash mid-way leaves no partial schema.
pub async fn run_migrations(pool: &DbPool) -> Result<(), AuthError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("Schema migrations applied");
    Ok(())
}

/// Verify the schema is present before the pool is handed to the services.
///
/// A failure here means the storage collaborator was used before bootstrap
/// and is fatal at startup.
pub async fn health_check(pool: &DbPool) -> Result<(), AuthError> {
    sqlx::query_scalar::<_, i64>("SELECT count(*) FROM users")
        .fetch_one(pool)
        .await
        .map_err(|_| AuthError::NotInitialized)?;
    Ok(())
}
