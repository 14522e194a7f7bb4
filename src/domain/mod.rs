//! Domain layer for pman startup configuration
//!
//! Typed configuration values shared by every job backend.

pub mod models;
