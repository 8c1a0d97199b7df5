//! Closed domain-error taxonomy for the account subsystem.
//!
//! Callers match on variants, never on message strings. Display strings are
//! the user-facing messages the boundary adapter hands to the shell.

/// Domain errors raised by the stores and the auth service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The email is already registered. Carries the attempted email so
    /// callers can report it without re-parsing messages.
    #[error("Email already exists")]
    DuplicateEmail { email: String },

    /// Unknown email or wrong password. Deliberately a single variant with a
    /// single message so the two cases cannot be told apart.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credentials were correct but the account is deactivated.
    #[error("Account is inactive")]
    AccountInactive,

    /// The storage schema is missing or the pool was handed out before
    /// bootstrap completed. Fatal at startup, never user-visible.
    #[error("Database is not initialized; run bootstrap first")]
    NotInitialized,

    /// Credential hashing or verification failed for a reason other than a
    /// simple mismatch (e.g. a malformed stored digest).
    #[error("Credential hashing failed: {0}")]
    Hash(String),

    /// Failed to apply embedded schema migrations at startup.
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Unexpected lower-layer database error, propagated unchanged.
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Convenience alias used across the workspace.
pub type AuthResult<T> = Result<T, AuthError>;
