//! pman - process manager startup configuration
//!
//! pman runs jobs on Docker Swarm, Kubernetes or Cromwell against host, NFS or
//! externally managed storage. This crate resolves the environment into a
//! typed, immutable [`Configuration`] and installs the logging profile for the
//! build's [`DeploymentMode`].
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Configuration value types
//! - **Infrastructure Layer** (`infrastructure`): Environment loading and logging
//!
//! # Example
//!
//! ```no_run
//! use pman::{logging, ConfigLoader, DeploymentMode};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mode = DeploymentMode::current();
//!     let config = ConfigLoader::load(mode)?;
//!     logging::install(mode)?;
//!     tracing::info!(backend = %config.container_env(), "pman starting");
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::models::{
    Configuration, ContainerBackend, ContainerEnv, CromwellSettings, DeploymentMode,
    KubernetesSettings, SecretKey, StorageBackend, SwarmSettings,
};
pub use infrastructure::config::{ConfigError, ConfigLoader, EnvSnapshot};
pub use infrastructure::logging;
