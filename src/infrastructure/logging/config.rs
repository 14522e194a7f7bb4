//! Per-mode logging policy: levels, sinks and service namespace routing.

use std::cmp;
use std::path::{Path, PathBuf};

use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Filter};

use crate::domain::models::config::DeploymentMode;

/// Root module of the service's own log records
pub const SERVICE_TARGET: &str = "pman";

/// File sink location used by every deployment mode
pub const DEFAULT_LOG_FILE: &str = "/tmp/debug.log";

/// Whether `target` is `pman` itself or one of its submodules.
///
/// Sibling crates such as `pman_client` are not part of the namespace.
pub fn is_service_target(target: &str) -> bool {
    target
        .strip_prefix(SERVICE_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// Destination a log record can be written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSink {
    /// Standard error
    Console,
    /// Append-only log file
    File,
}

impl LogSink {
    /// Most verbose level the sink accepts regardless of logger level
    pub const fn threshold(self) -> LevelFilter {
        match self {
            Self::Console => LevelFilter::INFO,
            Self::File => LevelFilter::DEBUG,
        }
    }
}

/// Logging policy for one deployment mode.
///
/// Records from the service namespace (see [`is_service_target`]) are routed
/// by the `service_*` settings; everything else goes through the root settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingProfile {
    /// Deployment mode the profile was built for
    pub mode: DeploymentMode,
    /// Level of the root logger
    pub root_level: LevelFilter,
    /// Sinks receiving root records
    pub root_sinks: Vec<LogSink>,
    /// Level of the service namespace logger
    pub service_level: LevelFilter,
    /// Sinks receiving service records
    pub service_sinks: Vec<LogSink>,
    /// Also hand service records to the root sinks
    pub propagate: bool,
    /// Path of the file sink
    pub log_file: PathBuf,
}

impl LoggingProfile {
    /// Policy for `mode`
    pub fn for_mode(mode: DeploymentMode) -> Self {
        match mode {
            DeploymentMode::Development => Self {
                mode,
                root_level: LevelFilter::INFO,
                root_sinks: vec![LogSink::Console],
                service_level: LevelFilter::DEBUG,
                service_sinks: vec![LogSink::Console, LogSink::File],
                propagate: false,
                log_file: PathBuf::from(DEFAULT_LOG_FILE),
            },
            DeploymentMode::Production => Self {
                mode,
                root_level: LevelFilter::INFO,
                root_sinks: vec![LogSink::Console],
                service_level: LevelFilter::INFO,
                service_sinks: vec![LogSink::File],
                propagate: false,
                log_file: PathBuf::from(DEFAULT_LOG_FILE),
            },
        }
    }

    /// Same policy writing the file sink to `path`
    #[must_use]
    pub fn with_log_file(mut self, path: impl AsRef<Path>) -> Self {
        self.log_file = path.as_ref().to_path_buf();
        self
    }

    /// Which records reach `sink`.
    ///
    /// A record is accepted when it passes both its logger level and the
    /// sink threshold.
    pub fn sink_filter(&self, sink: LogSink) -> SinkFilter {
        let root = if self.root_sinks.contains(&sink) {
            cmp::min(self.root_level, sink.threshold())
        } else {
            LevelFilter::OFF
        };

        let routes_service = self.service_sinks.contains(&sink)
            || (self.propagate && self.root_sinks.contains(&sink));
        let service = if routes_service {
            cmp::min(self.service_level, sink.threshold())
        } else {
            LevelFilter::OFF
        };

        SinkFilter { root, service }
    }
}

/// Per-sink layer filter splitting records into service and root records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFilter {
    root: LevelFilter,
    service: LevelFilter,
}

impl SinkFilter {
    /// Whether a record from `target` at `level` is written to the sink
    pub fn would_enable(&self, target: &str, level: &Level) -> bool {
        let limit = if is_service_target(target) {
            self.service
        } else {
            self.root
        };
        *level <= limit
    }
}

impl<S: Subscriber> Filter<S> for SinkFilter {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.would_enable(meta.target(), meta.level())
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(cmp::max(self.root, self.service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = "pman::jobs";
    const THIRD_PARTY: &str = "hyper::client";

    #[test]
    fn test_development_policy() {
        let profile = LoggingProfile::for_mode(DeploymentMode::Development);

        assert_eq!(profile.root_level, LevelFilter::INFO);
        assert_eq!(profile.root_sinks, vec![LogSink::Console]);
        assert_eq!(profile.service_level, LevelFilter::DEBUG);
        assert_eq!(profile.service_sinks, vec![LogSink::Console, LogSink::File]);
        assert!(!profile.propagate);
        assert_eq!(profile.log_file, Path::new("/tmp/debug.log"));
    }

    #[test]
    fn test_production_policy() {
        let profile = LoggingProfile::for_mode(DeploymentMode::Production);

        assert_eq!(profile.root_level, LevelFilter::INFO);
        assert_eq!(profile.root_sinks, vec![LogSink::Console]);
        assert_eq!(profile.service_level, LevelFilter::INFO);
        assert_eq!(profile.service_sinks, vec![LogSink::File]);
        assert!(!profile.propagate);
    }

    #[test]
    fn test_development_routing() {
        let profile = LoggingProfile::for_mode(DeploymentMode::Development);
        let console = profile.sink_filter(LogSink::Console);
        let file = profile.sink_filter(LogSink::File);

        assert!(console.would_enable(SERVICE, &Level::INFO));
        assert!(!console.would_enable(SERVICE, &Level::DEBUG));
        assert!(console.would_enable(THIRD_PARTY, &Level::INFO));
        assert!(!console.would_enable(THIRD_PARTY, &Level::DEBUG));

        assert!(file.would_enable(SERVICE, &Level::DEBUG));
        assert!(!file.would_enable(SERVICE, &Level::TRACE));
        assert!(!file.would_enable(THIRD_PARTY, &Level::ERROR));
    }

    #[test]
    fn test_production_routing() {
        let profile = LoggingProfile::for_mode(DeploymentMode::Production);
        let console = profile.sink_filter(LogSink::Console);
        let file = profile.sink_filter(LogSink::File);

        assert!(!console.would_enable(SERVICE, &Level::ERROR));
        assert!(console.would_enable(THIRD_PARTY, &Level::WARN));

        assert!(file.would_enable(SERVICE, &Level::INFO));
        assert!(!file.would_enable(SERVICE, &Level::DEBUG));
        assert!(!file.would_enable(THIRD_PARTY, &Level::ERROR));
    }

    #[test]
    fn test_service_namespace_boundary() {
        assert!(is_service_target("pman"));
        assert!(is_service_target("pman::jobs"));
        assert!(!is_service_target("pman_client"));
        assert!(!is_service_target("pman_client::x"));
        assert!(!is_service_target("pmanager"));
    }

    #[test]
    fn test_sibling_crate_follows_root_policy() {
        let profile = LoggingProfile::for_mode(DeploymentMode::Production);
        let console = profile.sink_filter(LogSink::Console);
        let file = profile.sink_filter(LogSink::File);

        assert!(console.would_enable("pman_client::x", &Level::INFO));
        assert!(!file.would_enable("pman_client::x", &Level::INFO));
        assert!(!console.would_enable("pman", &Level::INFO));
        assert!(file.would_enable("pman", &Level::INFO));
    }

    #[test]
    fn test_propagation_widens_root_sinks() {
        let mut profile = LoggingProfile::for_mode(DeploymentMode::Production);
        profile.propagate = true;

        let console = profile.sink_filter(LogSink::Console);
        assert!(console.would_enable(SERVICE, &Level::INFO));
        assert!(!console.would_enable(SERVICE, &Level::DEBUG));
    }

    #[test]
    fn test_with_log_file() {
        let profile =
            LoggingProfile::for_mode(DeploymentMode::Production).with_log_file("/var/log/pman.log");

        assert_eq!(profile.log_file, Path::new("/var/log/pman.log"));
        assert_ne!(profile, LoggingProfile::for_mode(DeploymentMode::Production));
    }
}
