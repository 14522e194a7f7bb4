//! Logging context construction and one-time process-wide installation.

use super::config::{LogSink, LoggingProfile};
use super::format::LineFormat;
use crate::domain::models::config::DeploymentMode;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::Dispatch;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

/// Logging setup errors
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Configured log file path ends without a file name
    #[error("Log file path has no file name: {}", .0.display())]
    InvalidLogFile(PathBuf),

    /// Log file or its directory could not be created
    #[error("Failed to open log file {}: {source}", path.display())]
    FileSink {
        /// Configured log file path
        path: PathBuf,
        /// Appender initialization failure
        #[source]
        source: InitError,
    },

    /// A different profile is already installed
    #[error("Logging already installed for {installed} mode, refusing to install {requested} profile")]
    ProfileConflict {
        /// Mode of the installed profile
        installed: DeploymentMode,
        /// Mode of the rejected profile
        requested: DeploymentMode,
    },

    /// Another global subscriber was set first
    #[error("A global tracing subscriber was installed outside of pman")]
    ForeignSubscriber,
}

static INSTALLED: OnceLock<LoggingContext> = OnceLock::new();

/// Logging profile bound to its sinks.
///
/// Built once at startup and either installed process-wide with [`install`]
/// or handed to code that logs through [`LoggingContext::in_scope`].
#[derive(Debug)]
pub struct LoggingContext {
    profile: LoggingProfile,
    dispatch: Dispatch,
}

impl LoggingContext {
    /// Build the context with stderr as console and the profile's log file
    ///
    /// # Errors
    /// Returns an error if the log file cannot be created
    pub fn new(profile: LoggingProfile) -> Result<Self, LoggingError> {
        let file = file_appender(&profile.log_file)?;
        Ok(Self::with_writers(profile, io::stderr, file))
    }

    /// Build the context with caller supplied sink writers
    pub fn with_writers<C, F>(profile: LoggingProfile, console: C, file: F) -> Self
    where
        C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
        F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let console_layer = tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_ansi(false)
            .with_writer(console)
            .with_filter(profile.sink_filter(LogSink::Console));

        let file_layer = tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_ansi(false)
            .with_writer(file)
            .with_filter(profile.sink_filter(LogSink::File));

        let subscriber = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        Self {
            profile,
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Policy the context was built from
    pub const fn profile(&self) -> &LoggingProfile {
        &self.profile
    }

    /// Run `f` with this context as the current thread's subscriber
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

/// Install the logging profile for `mode` process-wide.
///
/// # Errors
/// See [`install_profile`]
pub fn install(mode: DeploymentMode) -> Result<&'static LoggingContext, LoggingError> {
    install_profile(LoggingProfile::for_mode(mode))
}

/// Install `profile` as the process-wide logging context.
///
/// Installing the same profile again returns the existing context without
/// registering new sinks.
///
/// # Errors
/// Returns an error if a different profile or a foreign subscriber is already
/// installed, or if the log file cannot be created
pub fn install_profile(profile: LoggingProfile) -> Result<&'static LoggingContext, LoggingError> {
    if let Some(installed) = INSTALLED.get() {
        return ensure_same_profile(installed, &profile);
    }

    let context = LoggingContext::new(profile)?;
    tracing::dispatcher::set_global_default(context.dispatch.clone())
        .map_err(|_| LoggingError::ForeignSubscriber)?;
    let installed = INSTALLED.get_or_init(|| context);

    tracing::info!(
        mode = %installed.profile.mode,
        log_file = %installed.profile.log_file.display(),
        "logging profile installed"
    );

    Ok(installed)
}

fn ensure_same_profile(
    installed: &'static LoggingContext,
    requested: &LoggingProfile,
) -> Result<&'static LoggingContext, LoggingError> {
    if installed.profile == *requested {
        Ok(installed)
    } else {
        Err(LoggingError::ProfileConflict {
            installed: installed.profile.mode,
            requested: requested.mode,
        })
    }
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidLogFile(path.to_path_buf()))?;
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(directory)
        .map_err(|source| LoggingError::FileSink {
            path: path.to_path_buf(),
            source,
        })
}
