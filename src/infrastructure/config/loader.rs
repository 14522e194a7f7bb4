//! Backend-aware resolution of the process configuration.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::env_source::EnvSnapshot;
use super::vars;
use crate::domain::models::config::{
    Configuration, ContainerBackend, ContainerEnv, CromwellSettings, DeploymentMode,
    KubernetesSettings, SecretKey, StorageBackend, SwarmSettings, UnknownContainerEnv,
};

/// Configuration error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable required by the selected backend, storage or mode is unset
    #[error("Missing required environment variable: {0}")]
    MissingVariable(String),

    /// Variable is set but cannot be parsed as its declared type
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidValue {
        /// Offending variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Dotenv file exists but cannot be read or parsed
    #[error("Failed to read dotenv file {}: {message}", path.display())]
    Dotenv {
        /// File that failed
        path: PathBuf,
        /// Underlying dotenvy error
        message: String,
    },
}

/// Resolves the process [`Configuration`] from environment variables.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment
    ///
    /// Precedence (lowest to highest):
    /// 1. Built-in defaults
    /// 2. `.env` in the working directory or the nearest parent that has one
    /// 3. Process environment variables
    pub fn load(mode: DeploymentMode) -> Result<Configuration, ConfigError> {
        let env = EnvSnapshot::from_process().with_discovered_dotenv()?;
        Self::resolve(&env, mode)
    }

    /// Load configuration using a specific dotenv file for defaults
    pub fn load_from_file(
        path: impl AsRef<Path>,
        mode: DeploymentMode,
    ) -> Result<Configuration, ConfigError> {
        let env = EnvSnapshot::from_process().with_dotenv_defaults(path)?;
        Self::resolve(&env, mode)
    }

    /// Build a [`Configuration`] from an environment snapshot.
    ///
    /// `CONTAINER_ENV` and `STORAGE_TYPE` decide which further variables are
    /// read; variables for inactive backends are ignored even when set. The
    /// selected backends are reported at debug level to the current subscriber.
    pub fn resolve(env: &EnvSnapshot, mode: DeploymentMode) -> Result<Configuration, ConfigError> {
        let job_logs_tail = env
            .parsed(vars::JOB_LOGS_TAIL)?
            .unwrap_or(vars::DEFAULT_JOB_LOGS_TAIL);
        let container_env = env
            .get(vars::CONTAINER_ENV)
            .unwrap_or(vars::DEFAULT_CONTAINER_ENV);
        let storage_type = env
            .get(vars::STORAGE_TYPE)
            .unwrap_or(vars::DEFAULT_STORAGE_TYPE);
        let remove_jobs = remove_jobs_flag(env.get(vars::REMOVE_JOBS));

        let storage = Self::resolve_storage(env, storage_type)?;
        let container = Self::resolve_container(env, container_env)?;

        let secret_key = match mode {
            DeploymentMode::Production => Some(SecretKey::new(env.required(vars::SECRET_KEY)?)),
            DeploymentMode::Development => None,
        };

        debug!(
            mode = %mode,
            container_env = %container.container_env(),
            storage_type = storage.storage_type(),
            job_logs_tail,
            remove_jobs,
            "configuration resolved"
        );

        Ok(Configuration {
            debug: mode.is_debug(),
            testing: mode.is_testing(),
            deployment_mode: mode,
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            job_logs_tail,
            container,
            storage,
            remove_jobs,
            secret_key,
        })
    }

    fn resolve_storage(env: &EnvSnapshot, storage_type: &str) -> Result<StorageBackend, ConfigError> {
        match storage_type {
            "host" => Ok(StorageBackend::Host {
                storebase: PathBuf::from(env.required(vars::STOREBASE)?),
            }),
            "nfs" => Ok(StorageBackend::Nfs {
                storebase: PathBuf::from(env.required(vars::STOREBASE)?),
                nfs_server: env.required(vars::NFS_SERVER)?.to_string(),
            }),
            other => Ok(StorageBackend::Other {
                storage_type: other.to_string(),
            }),
        }
    }

    fn resolve_container(
        env: &EnvSnapshot,
        container_env: &str,
    ) -> Result<ContainerBackend, ConfigError> {
        let container_env: ContainerEnv =
            container_env
                .parse()
                .map_err(|err: UnknownContainerEnv| ConfigError::InvalidValue {
                    name: vars::CONTAINER_ENV.to_string(),
                    reason: err.to_string(),
                })?;

        let backend = match container_env {
            ContainerEnv::Swarm => ContainerBackend::Swarm(SwarmSettings {
                docker_host: env.non_empty(vars::DOCKER_HOST).map(str::to_string),
                docker_tls_verify: env.parsed_non_empty(vars::DOCKER_TLS_VERIFY)?,
                docker_cert_path: env.non_empty(vars::DOCKER_CERT_PATH).map(str::to_string),
            }),
            ContainerEnv::Kubernetes => ContainerBackend::Kubernetes(KubernetesSettings {
                job_namespace: env
                    .get(vars::JOB_NAMESPACE)
                    .unwrap_or(vars::DEFAULT_JOB_NAMESPACE)
                    .to_string(),
                run_as_user: env.parsed(vars::SECURITYCONTEXT_RUN_AS_USER)?,
                run_as_group: env.parsed(vars::SECURITYCONTEXT_RUN_AS_GROUP)?,
            }),
            ContainerEnv::Cromwell => ContainerBackend::Cromwell(CromwellSettings {
                url: env.required(vars::CROMWELL_URL)?.to_string(),
                timelimit_minutes: env.parsed_required(vars::TIMELIMIT_MINUTES)?,
            }),
        };

        Ok(backend)
    }
}

/// Jobs are removed unless `REMOVE_JOBS` is some casing of `no`.
fn remove_jobs_flag(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.to_lowercase() != "no")
}
