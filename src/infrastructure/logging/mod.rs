//! Logging infrastructure
//!
//! Deployment-mode logging profiles on top of tracing-subscriber:
//! - Per-mode level and sink policy
//! - Console and file sinks with a shared line format
//! - One-time process-wide installation

#[cfg(test)]
pub(crate) mod capture;
pub mod config;
pub mod format;
pub mod logger;

pub use config::{
    is_service_target, LogSink, LoggingProfile, SinkFilter, DEFAULT_LOG_FILE, SERVICE_TARGET,
};
pub use format::LineFormat;
pub use logger::{install, install_profile, LoggingContext, LoggingError};
