//! Tracing subscriber installation for the host process.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Call once, before [`bootstrap`].
///
/// Loads `.env` first so `RUST_LOG` and `ALCOVE_DATABASE_PATH` can live
/// there during development. Defaults to debug-level output for the alcove
/// crates when `RUST_LOG` is unset.
///
/// [`bootstrap`]: crate::bootstrap::bootstrap
pub fn init_tracing() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "alcove_bridge=debug,alcove_auth=debug,alcove_db=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
