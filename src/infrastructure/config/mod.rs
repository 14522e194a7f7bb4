//! Configuration management infrastructure
//!
//! Environment-driven configuration:
//! - Process environment snapshot with optional `.env` defaults
//! - Backend selection via `CONTAINER_ENV` and `STORAGE_TYPE`
//! - Per-backend required variable validation

pub mod env_source;
pub mod loader;
pub mod vars;

pub use env_source::EnvSnapshot;
pub use loader::{ConfigError, ConfigLoader};
