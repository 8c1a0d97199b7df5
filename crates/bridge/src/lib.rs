//! Boundary adapter between the desktop shell and the account subsystem.
//!
//! - [`commands`] -- the transport-agnostic command surface; every call
//!   returns a `{success, ..., error}` envelope the shell forwards over its
//!   IPC pipe.
//! - [`bootstrap`] -- process startup: pool, migrations, health check.
//! - [`telemetry`] -- tracing subscriber installation for the host.

pub mod bootstrap;
pub mod commands;
pub mod telemetry;

pub use bootstrap::bootstrap;
pub use commands::AuthBridge;
