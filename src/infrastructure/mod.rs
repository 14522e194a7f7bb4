//! Infrastructure layer module
//!
//! Adapters between the process environment and the domain:
//! - Configuration resolution from environment variables and `.env` files
//! - Logging profile installation

pub mod config;
pub mod logging;
