//! Command surface consumed by the desktop shell.
//!
//! Each command wraps one auth-service call and flattens the outcome into a
//! serializable envelope: `success` plus either the payload fields or a
//! human-readable `error` message. Domain errors surface their display
//! strings; unexpected internal failures are logged here and masked with a
//! generic message.

use serde::{Deserialize, Serialize};

use alcove_auth::{AuthService, LoginSession};
use alcove_core::error::AuthError;
use alcove_core::types::Timestamp;
use alcove_db::models::user::User;

/// Payload for the `register` command.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Payload for the `login` command.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Envelope for `register`.
#[derive(Debug, Serialize)]
pub struct RegisterResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Envelope for `login` and `get_session`.
#[derive(Debug, Serialize)]
pub struct SessionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionResult {
    fn ok(session: LoginSession) -> Self {
        Self {
            success: true,
            session_id: Some(session.session_id),
            user: Some(session.user),
            expires_at: Some(session.expires_at),
            error: None,
        }
    }

    fn fail(message: String) -> Self {
        Self {
            success: false,
            session_id: None,
            user: None,
            expires_at: None,
            error: Some(message),
        }
    }
}

/// Envelope for `logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResult {
    /// True iff a session row was actually removed.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The shell-facing command handlers.
pub struct AuthBridge {
    service: AuthService,
}

impl AuthBridge {
    pub fn new(service: AuthService) -> Self {
        Self { service }
    }

    /// The wrapped service, for hosts needing direct access (sweeps, admin
    /// listings).
    pub fn service(&self) -> &AuthService {
        &self.service
    }

    pub async fn register(&self, payload: RegisterPayload) -> RegisterResult {
        match self
            .service
            .register(&payload.email, &payload.password, &payload.name)
            .await
        {
            Ok(user) => RegisterResult {
                success: true,
                user: Some(user),
                error: None,
            },
            Err(err) => RegisterResult {
                success: false,
                user: None,
                error: Some(error_message(err)),
            },
        }
    }

    pub async fn login(&self, payload: LoginPayload) -> SessionResult {
        match self.service.login(&payload.email, &payload.password).await {
            Ok(session) => SessionResult::ok(session),
            Err(err) => SessionResult::fail(error_message(err)),
        }
    }

    pub async fn get_session(&self, session_id: &str) -> SessionResult {
        match self.service.current_session(session_id).await {
            Ok(Some(session)) => SessionResult::ok(session),
            Ok(None) => SessionResult::fail("Not authenticated".to_string()),
            Err(err) => SessionResult::fail(error_message(err)),
        }
    }

    pub async fn logout(&self, session_id: &str) -> LogoutResult {
        match self.service.logout(session_id).await {
            Ok(removed) => LogoutResult {
                success: removed,
                error: None,
            },
            Err(err) => LogoutResult {
                success: false,
                error: Some(error_message(err)),
            },
        }
    }
}

/// Map an error to the message the shell shows. Domain errors pass their
/// display string through; internal failures are logged and sanitized.
fn error_message(err: AuthError) -> String {
    match &err {
        AuthError::Storage(_)
        | AuthError::Hash(_)
        | AuthError::Migration(_)
        | AuthError::NotInitialized => {
            tracing::error!(error = %err, "Internal error during auth command");
            "An internal error occurred".to_string()
        }
        _ => err.to_string(),
    }
}
