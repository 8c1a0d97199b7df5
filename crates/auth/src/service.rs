//! Account orchestration: registration, login, session lookup, logout.

use chrono::{Duration, Utc};
use serde::Serialize;

use alcove_core::error::AuthError;
use alcove_core::types::Timestamp;
use alcove_db::models::session::CreateSession;
use alcove_db::models::user::{CreateUser, User};
use alcove_db::repositories::{SessionRepo, UserRepo};
use alcove_db::DbPool;

use crate::password::{hash_password, verify_password};

/// Fixed session lifetime granted at login.
const SESSION_TTL_DAYS: i64 = 7;

/// An authenticated session as handed to the shell: the opaque session id,
/// the public user projection, and the absolute expiry.
#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub session_id: String,
    pub user: User,
    pub expires_at: Timestamp,
}

/// Orchestrates the user store, session store, and credential hasher.
///
/// Cheaply cloneable; the pool is constructed by the process bootstrapper
/// and injected here, never reached through ambient globals.
#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
}

impl AuthService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The injected storage handle, for collaborators that need direct
    /// store access (e.g. the admin listing in the bridge).
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Register a new account. The returned projection never contains the
    /// password hash.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AuthError> {
        if UserRepo::email_exists(&self.pool, email).await? {
            return Err(AuthError::DuplicateEmail {
                email: email.to_string(),
            });
        }

        let password_hash = hash_password(password).await?;
        let user = UserRepo::create(
            &self.pool,
            &CreateUser {
                email: email.to_string(),
                password_hash,
                name: name.to_string(),
            },
        )
        .await?;

        tracing::info!(user_id = user.id, "Registered new account");
        Ok(user)
    }

    /// Authenticate with email + password and issue a session valid for
    /// seven days.
    ///
    /// Unknown email and wrong password fail with the same
    /// `InvalidCredentials` value so the two cases cannot be told apart.
    /// The returned `user.last_login` is the value observed at load time,
    /// i.e. the previous login instant.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AuthError> {
        let user = UserRepo::find_by_email_with_secrets(&self.pool, email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AuthError::AccountInactive);
        }

        if !verify_password(password, &user.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        UserRepo::touch_last_login(&self.pool, user.id).await?;

        let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
        let session = SessionRepo::create(
            &self.pool,
            &CreateSession {
                user_id: user.id,
                expires_at,
                ip_address: None,
                user_agent: None,
            },
        )
        .await?;

        tracing::info!(user_id = user.id, "Login succeeded");
        Ok(LoginSession {
            session_id: session.id,
            expires_at: session.expires_at,
            user: user.into_public(),
        })
    }

    /// Look up the session behind an id, if it is still live.
    ///
    /// Absence is the only "not authenticated" signal: an empty id, an
    /// unknown or expired session, and a vanished owner all yield `None`,
    /// never an error.
    pub async fn current_session(
        &self,
        session_id: &str,
    ) -> Result<Option<LoginSession>, AuthError> {
        if session_id.is_empty() {
            return Ok(None);
        }

        let Some(session) = SessionRepo::find_active_by_id(&self.pool, session_id).await? else {
            return Ok(None);
        };

        let Some(user) = UserRepo::find_by_id(&self.pool, session.user_id).await? else {
            return Ok(None);
        };

        Ok(Some(LoginSession {
            session_id: session.id,
            user,
            expires_at: session.expires_at,
        }))
    }

    /// Delete the session. Returns `true` iff a row was removed, so a second
    /// logout on the same id reports `false`.
    pub async fn logout(&self, session_id: &str) -> Result<bool, AuthError> {
        if session_id.is_empty() {
            return Ok(false);
        }

        let removed = SessionRepo::delete(&self.pool, session_id).await?;
        if removed {
            tracing::debug!(session_id, "Session removed on logout");
        }
        Ok(removed)
    }

    /// Caller-triggered sweep of expired sessions; cadence is the host's
    /// decision. Returns the count removed.
    pub async fn sweep_expired_sessions(&self) -> Result<u64, AuthError> {
        let removed = SessionRepo::delete_expired(&self.pool).await?;
        if removed > 0 {
            tracing::debug!(removed, "Swept expired sessions");
        }
        Ok(removed)
    }
}
