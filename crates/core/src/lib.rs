//! Shared types and errors for the alcove account subsystem.

pub mod error;
pub mod types;

pub use error::{AuthError, AuthResult};
