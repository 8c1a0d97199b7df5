//! Repository for the `users` and `recovery_keys` tables.

use chrono::Utc;

use alcove_core::error::AuthError;
use alcove_core::types::DbId;

use crate::models::recovery_key::RecoveryKey;
use crate::models::user::{CreateUser, UpdateUser, User, UserWithSecrets};
use crate::DbPool;

/// Public column list shared across queries; excludes the password hash.
const COLUMNS: &str = "id, email, name, created_at, updated_at, is_active, last_login";

/// Full column list including the password hash. Only the with-secrets
/// lookup uses it.
const SECRET_COLUMNS: &str =
    "id, email, password_hash, name, created_at, updated_at, is_active, last_login";

/// Column list for recovery keys.
const RK_COLUMNS: &str = "id, user_id, recovery_phrase_hash, created_at, last_used";

/// Translate a unique-constraint violation on `users.email` into the domain
/// error; leave everything else as a raw storage error.
fn map_unique_violation(err: sqlx::Error, email: &str) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AuthError::DuplicateEmail {
                email: email.to_string(),
            }
        }
        _ => AuthError::Storage(err),
    }
}

/// Provides CRUD operations for users and their recovery keys.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row (public projection).
    ///
    /// Fails with `DuplicateEmail` when the email is already registered.
    pub async fn create(pool: &DbPool, input: &CreateUser) -> Result<User, AuthError> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO users (email, password_hash, name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
            .map_err(|e| map_unique_violation(e, &input.email))
    }

    /// Find a user by internal ID (public projection).
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<User>, AuthError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by email including the password hash.
    ///
    /// Internal-only read for the login path; never expose the result.
    pub async fn find_by_email_with_secrets(
        pool: &DbPool,
        email: &str,
    ) -> Result<Option<UserWithSecrets>, AuthError> {
        let query = format!("SELECT {SECRET_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, UserWithSecrets>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by email (public projection, case-sensitive as stored).
    pub async fn find_by_email_public(
        pool: &DbPool,
        email: &str,
    ) -> Result<Option<User>, AuthError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Update a user. Only non-`None` fields in `input` are applied; an
    /// input with no recognized fields returns the current row unchanged.
    ///
    /// Returns `None` if no row with the given `id` exists. Re-raises
    /// `DuplicateEmail` when an email change collides.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, AuthError> {
        if input.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        let query = format!(
            "UPDATE users SET
                email = COALESCE(?, email),
                password_hash = COALESCE(?, password_hash),
                name = COALESCE(?, name),
                is_active = COALESCE(?, is_active),
                updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(input.is_active)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| map_unique_violation(e, input.email.as_deref().unwrap_or_default()))
    }

    /// Set `last_login` to the current time. Fire-and-forget.
    pub async fn touch_last_login(pool: &DbPool, id: DbId) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a user. Sessions and the recovery key go with it via
    /// `ON DELETE CASCADE`. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether an email is already registered.
    pub async fn email_exists(pool: &DbPool, email: &str) -> Result<bool, AuthError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)",
        )
        .bind(email)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// List users ordered by most recently created first (public projection).
    pub async fn list_all(pool: &DbPool, limit: i64, offset: i64) -> Result<Vec<User>, AuthError> {
        let query =
            format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?");
        let users = sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(users)
    }

    // -- Recovery keys ------------------------------------------------------

    /// Create or overwrite the recovery key for a user.
    ///
    /// Upsert on the unique `user_id`: a second call replaces the stored
    /// phrase hash in place, it never creates a duplicate row.
    pub async fn set_recovery_key(
        pool: &DbPool,
        user_id: DbId,
        recovery_phrase_hash: &str,
    ) -> Result<RecoveryKey, AuthError> {
        let query = format!(
            "INSERT INTO recovery_keys (user_id, recovery_phrase_hash, created_at)
             VALUES (?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                recovery_phrase_hash = excluded.recovery_phrase_hash,
                created_at = excluded.created_at
             RETURNING {RK_COLUMNS}"
        );
        let key = sqlx::query_as::<_, RecoveryKey>(&query)
            .bind(user_id)
            .bind(recovery_phrase_hash)
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;
        Ok(key)
    }

    /// Fetch the recovery key for a user, if one was set.
    pub async fn get_recovery_key(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Option<RecoveryKey>, AuthError> {
        let query = format!("SELECT {RK_COLUMNS} FROM recovery_keys WHERE user_id = ?");
        let key = sqlx::query_as::<_, RecoveryKey>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(key)
    }

    /// Stamp `last_used` on the user's recovery key. Returns `true` if a key
    /// existed.
    pub async fn mark_recovery_key_used(pool: &DbPool, user_id: DbId) -> Result<bool, AuthError> {
        let result = sqlx::query("UPDATE recovery_keys SET last_used = ? WHERE user_id = ?")
            .bind(Utc::now())
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the user's recovery key. Returns `true` if a row was removed.
    pub async fn delete_recovery_key(pool: &DbPool, user_id: DbId) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM recovery_keys WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
