//! Integration tests for the auth service: registration, login, session
//! lifecycle, and logout, against a throwaway SQLite database.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use alcove_auth::AuthService;
use alcove_core::error::AuthError;
use alcove_db::models::session::CreateSession;
use alcove_db::models::user::UpdateUser;
use alcove_db::repositories::{SessionRepo, UserRepo};

const PASSWORD: &str = "correct-horse-battery-staple";

async fn register(service: &AuthService, email: &str) -> alcove_db::models::user::User {
    service
        .register(email, PASSWORD, "Test User")
        .await
        .expect("registration should succeed")
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_returns_public_projection(pool: SqlitePool) {
    let service = AuthService::new(pool.clone());
    let user = register(&service, "a@example.com").await;

    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());

    let found = UserRepo::find_by_email_public(&pool, "a@example.com")
        .await
        .unwrap();
    assert!(found.is_some(), "registered user must be findable by email");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: SqlitePool) {
    let service = AuthService::new(pool.clone());
    let first = register(&service, "a@example.com").await;

    let err = service
        .register("a@example.com", "another-password", "Other Name")
        .await
        .expect_err("second registration must fail");
    assert_matches!(err, AuthError::DuplicateEmail { ref email } if email == "a@example.com");

    // First registration unaffected.
    let still = UserRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(still.name, "Test User");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_issues_seven_day_session(pool: SqlitePool) {
    let service = AuthService::new(pool.clone());
    let user = register(&service, "a@example.com").await;

    let before = Utc::now();
    let session = service.login("a@example.com", PASSWORD).await.unwrap();
    let after = Utc::now();

    assert_eq!(session.user.id, user.id);
    // Expiry is exactly 7 days from the login instant, within scheduling
    // tolerance.
    assert!(session.expires_at >= before + Duration::days(7));
    assert!(session.expires_at <= after + Duration::days(7));

    // The session is immediately visible as active.
    assert!(SessionRepo::is_valid(&pool, &session.session_id)
        .await
        .unwrap());

    // last_login was touched in storage.
    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(stored.last_login.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_reports_previous_last_login(pool: SqlitePool) {
    let service = AuthService::new(pool.clone());
    let user = register(&service, "a@example.com").await;

    let first = service.login("a@example.com", PASSWORD).await.unwrap();
    assert!(
        first.user.last_login.is_none(),
        "first login observes no prior login"
    );

    let second = service.login("a@example.com", PASSWORD).await.unwrap();
    let previous = second
        .user
        .last_login
        .expect("second login observes the first");

    let stored = UserRepo::find_by_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap()
        .last_login
        .unwrap();
    assert!(stored >= previous, "stored last_login only moves forward");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_wrong_password_and_unknown_email_are_indistinguishable(pool: SqlitePool) {
    let service = AuthService::new(pool);
    register(&service, "a@example.com").await;

    let wrong_password = service
        .login("a@example.com", "not-the-password")
        .await
        .expect_err("wrong password must fail");
    let unknown_email = service
        .login("ghost@example.com", PASSWORD)
        .await
        .expect_err("unknown email must fail");

    assert_matches!(wrong_password, AuthError::InvalidCredentials);
    assert_matches!(unknown_email, AuthError::InvalidCredentials);
    assert_eq!(
        wrong_password.to_string(),
        unknown_email.to_string(),
        "messages must not allow email enumeration"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_account(pool: SqlitePool) {
    let service = AuthService::new(pool.clone());
    let user = register(&service, "a@example.com").await;

    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = service
        .login("a@example.com", PASSWORD)
        .await
        .expect_err("deactivated account must not log in");
    assert_matches!(err, AuthError::AccountInactive);
}

// ---------------------------------------------------------------------------
// Session lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_current_session_roundtrip(pool: SqlitePool) {
    let service = AuthService::new(pool);
    let user = register(&service, "a@example.com").await;
    let login = service.login("a@example.com", PASSWORD).await.unwrap();

    let current = service
        .current_session(&login.session_id)
        .await
        .unwrap()
        .expect("fresh session should resolve");
    assert_eq!(current.session_id, login.session_id);
    assert_eq!(current.user.id, user.id);
    assert_eq!(current.expires_at.timestamp(), login.expires_at.timestamp());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_current_session_absent_cases(pool: SqlitePool) {
    let service = AuthService::new(pool.clone());
    let user = register(&service, "a@example.com").await;

    // Empty id.
    assert!(service.current_session("").await.unwrap().is_none());
    // Unknown id.
    assert!(service
        .current_session("00000000-0000-4000-8000-000000000000")
        .await
        .unwrap()
        .is_none());

    // Expired session.
    let expired = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            expires_at: Utc::now() - Duration::minutes(1),
            ip_address: None,
            user_agent: None,
        },
    )
    .await
    .unwrap();
    assert!(service
        .current_session(&expired.id)
        .await
        .unwrap()
        .is_none());

    // Owner deleted after login.
    let login = service.login("a@example.com", PASSWORD).await.unwrap();
    UserRepo::delete(&pool, user.id).await.unwrap();
    assert!(service
        .current_session(&login.session_id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Logout and sweep
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_is_idempotent(pool: SqlitePool) {
    let service = AuthService::new(pool);
    register(&service, "a@example.com").await;
    let login = service.login("a@example.com", PASSWORD).await.unwrap();

    assert!(!service.logout("").await.unwrap(), "empty id short-circuits");
    assert!(service.logout(&login.session_id).await.unwrap());
    assert!(
        !service.logout(&login.session_id).await.unwrap(),
        "second logout on the same id reports false"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sweep_expired_sessions(pool: SqlitePool) {
    let service = AuthService::new(pool.clone());
    let user = register(&service, "a@example.com").await;

    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            expires_at: Utc::now() - Duration::minutes(1),
            ip_address: None,
            user_agent: None,
        },
    )
    .await
    .unwrap();
    let live = service.login("a@example.com", PASSWORD).await.unwrap();

    let removed = service.sweep_expired_sessions().await.unwrap();
    assert_eq!(removed, 1);
    assert!(service
        .current_session(&live.session_id)
        .await
        .unwrap()
        .is_some());
}
