use std::path::PathBuf;

/// Storage configuration supplied by the host process.
///
/// The desktop shell resolves its own data directory and hands the database
/// path in at construction time; this crate never asks the host who it is.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the SQLite database file.
    pub database_path: PathBuf,
}

impl StorageConfig {
    /// Configuration for an explicit database path.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default       |
    /// |------------------------|---------------|
    /// | `ALCOVE_DATABASE_PATH` | `./alcove.db` |
    pub fn from_env() -> Self {
        let database_path = std::env::var("ALCOVE_DATABASE_PATH")
            .unwrap_or_else(|_| "alcove.db".into())
            .into();
        Self { database_path }
    }
}
