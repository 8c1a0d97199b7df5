//! Process bootstrap.
//!
//! The storage lifecycle is owned here, invoked once by the host: connect
//! the pool, apply migrations, verify the schema, then hand out the
//! assembled command surface. Any error is fatal to startup.

use alcove_auth::AuthService;
use alcove_core::error::AuthError;
use alcove_db::StorageConfig;

use crate::commands::AuthBridge;

/// Connect, migrate, verify, and assemble the bridge.
pub async fn bootstrap(config: &StorageConfig) -> Result<AuthBridge, AuthError> {
    let pool = alcove_db::create_pool(config).await?;
    tracing::info!(path = %config.database_path.display(), "Database pool created");

    alcove_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    alcove_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    Ok(AuthBridge::new(AuthService::new(pool)))
}
