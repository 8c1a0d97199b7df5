//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where patching exists

pub mod recovery_key;
pub mod session;
pub mod user;
