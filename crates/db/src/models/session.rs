//! Session model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use alcove_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table.
///
/// Validity is a computed predicate (`expires_at` against wall-clock time),
/// never a stored flag; the active-only queries re-check on every read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    /// Opaque, unguessable token (UUIDv4) generated at creation.
    pub id: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new session. `expires_at` is an absolute instant.
pub struct CreateSession {
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
