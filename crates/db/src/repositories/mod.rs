//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&DbPool` as the first argument. Unique-constraint violations on
//! `users.email` are translated into [`AuthError::DuplicateEmail`] here;
//! every other database error passes through unchanged as `Storage`.
//!
//! [`AuthError::DuplicateEmail`]: alcove_core::error::AuthError

pub mod session_repo;
pub mod user_repo;

pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
