//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use alcove_core::types::{DbId, Timestamp};

/// Public projection of a user row: everything except the password hash.
///
/// This is the only user shape that crosses the service boundary, so a hash
/// can never leak into a serialized response by accident.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub is_active: bool,
    pub last_login: Option<Timestamp>,
}

/// Full user row including the password hash.
///
/// Deliberately not `Serialize`; the login path is its only consumer.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithSecrets {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub is_active: bool,
    pub last_login: Option<Timestamp>,
}

impl UserWithSecrets {
    /// Strip the credential material, leaving the public projection.
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            email: self.email,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            is_active: self.is_active,
            last_login: self.last_login,
        }
    }
}

/// DTO for creating a new user. The password arrives already hashed.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// DTO for updating an existing user. All fields are optional; anything not
/// in this whitelist cannot be patched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUser {
    /// True when no recognized field is set, in which case an update is a
    /// read of the current row.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.name.is_none()
            && self.is_active.is_none()
    }
}
