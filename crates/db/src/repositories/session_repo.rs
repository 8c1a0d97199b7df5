//! Repository for the `sessions` table.
//!
//! Expiry is evaluated lazily: active-only queries compare `expires_at`
//! against a wall-clock instant bound from Rust on every call. The explicit
//! sweep ([`SessionRepo::delete_expired`]) is the only bulk cleanup; nothing
//! here schedules it.

use chrono::{Duration, Utc};
use uuid::Uuid;

use alcove_core::error::AuthError;
use alcove_core::types::{DbId, Timestamp};

use crate::models::session::{CreateSession, Session};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, expires_at, ip_address, user_agent, created_at";

/// Provides CRUD operations for sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session with a freshly generated opaque id, returning
    /// the created row.
    pub async fn create(pool: &DbPool, input: &CreateSession) -> Result<Session, AuthError> {
        let id = Uuid::new_v4().to_string();
        let query = format!(
            "INSERT INTO sessions (id, user_id, expires_at, ip_address, user_agent, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(&id)
            .bind(input.user_id)
            .bind(input.expires_at)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;
        Ok(session)
    }

    /// Find a session by id regardless of expiry. Presence does not imply
    /// validity.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Session>, AuthError> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = ?");
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(session)
    }

    /// Find a session by id, filtered to those not yet expired.
    pub async fn find_active_by_id(pool: &DbPool, id: &str) -> Result<Option<Session>, AuthError> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = ? AND expires_at > ?");
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await?;
        Ok(session)
    }

    /// All sessions for a user, most recently created first.
    pub async fn find_all_by_user(pool: &DbPool, user_id: DbId) -> Result<Vec<Session>, AuthError> {
        let query =
            format!("SELECT {COLUMNS} FROM sessions WHERE user_id = ? ORDER BY created_at DESC");
        let sessions = sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(sessions)
    }

    /// Unexpired sessions for a user, most recently created first.
    pub async fn find_active_by_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Vec<Session>, AuthError> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE user_id = ? AND expires_at > ?
             ORDER BY created_at DESC"
        );
        let sessions = sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(Utc::now())
            .fetch_all(pool)
            .await?;
        Ok(sessions)
    }

    /// Replace a session's expiration with an absolute instant.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_expiration(
        pool: &DbPool,
        id: &str,
        expires_at: Timestamp,
    ) -> Result<Option<Session>, AuthError> {
        let query = format!("UPDATE sessions SET expires_at = ? WHERE id = ? RETURNING {COLUMNS}");
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(expires_at)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(session)
    }

    /// Extend a session by `additional_minutes` relative to its *stored*
    /// expiration, not to now, so repeated extensions compound even when
    /// called late. Read-modify-write inside one transaction.
    pub async fn extend(
        pool: &DbPool,
        id: &str,
        additional_minutes: i64,
    ) -> Result<Option<Session>, AuthError> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM sessions WHERE id = ?");
        let Some(session) = sqlx::query_as::<_, Session>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let new_expiry = session.expires_at + Duration::minutes(additional_minutes);
        let update = format!("UPDATE sessions SET expires_at = ? WHERE id = ? RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, Session>(&update)
            .bind(new_expiry)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Delete a session. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all sessions for a user. Returns the count removed.
    pub async fn delete_all_for_user(pool: &DbPool, user_id: DbId) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Sweep: delete sessions whose expiration has passed. Returns the count
    /// removed; active sessions are untouched.
    pub async fn delete_expired(pool: &DbPool) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Check whether a session exists and is not expired.
    pub async fn is_valid(pool: &DbPool, id: &str) -> Result<bool, AuthError> {
        Ok(Self::find_active_by_id(pool, id).await?.is_some())
    }
}
