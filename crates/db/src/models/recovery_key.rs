//! Recovery key model.

use sqlx::FromRow;

use alcove_core::types::{DbId, Timestamp};

/// A recovery key row. At most one exists per user (unique `user_id`);
/// setting a second one overwrites in place.
#[derive(Debug, Clone, FromRow)]
pub struct RecoveryKey {
    pub id: DbId,
    pub user_id: DbId,
    pub recovery_phrase_hash: String,
    pub created_at: Timestamp,
    pub last_used: Option<Timestamp>,
}
