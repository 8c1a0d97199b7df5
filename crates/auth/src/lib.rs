//! Authentication primitives and orchestration.
//!
//! - [`password`] -- bcrypt credential hashing and verification.
//! - [`service`] -- registration, login, session lookup, and logout.

pub mod password;
pub mod service;

pub use service::{AuthService, LoginSession};
