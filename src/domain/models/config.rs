//! Typed configuration values produced at startup.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Build variant the service runs as.
///
/// Fixed per build: the `production` cargo feature selects
/// [`DeploymentMode::Production`], every other build is development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Debug build: verbose service logging, no secret key
    Development,
    /// Release build: file-only service logging, `SECRET_KEY` required
    Production,
}

impl DeploymentMode {
    /// Mode selected at compile time.
    pub const fn current() -> Self {
        if cfg!(feature = "production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Debug flag of the build variant
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Testing flag of the build variant
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Lowercase name as used in environment variables
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orchestration engine that executes jobs (`CONTAINER_ENV`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerEnv {
    /// Docker Swarm
    Swarm,
    /// Kubernetes
    Kubernetes,
    /// Cromwell workflow engine
    Cromwell,
}

impl ContainerEnv {
    /// Lowercase name as used in environment variables
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Swarm => "swarm",
            Self::Kubernetes => "kubernetes",
            Self::Cromwell => "cromwell",
        }
    }
}

impl fmt::Display for ContainerEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when `CONTAINER_ENV` names no known orchestration engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized container backend '{0}', expected one of: swarm, kubernetes, cromwell")]
pub struct UnknownContainerEnv(pub String);

impl FromStr for ContainerEnv {
    type Err = UnknownContainerEnv;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swarm" => Ok(Self::Swarm),
            "kubernetes" => Ok(Self::Kubernetes),
            "cromwell" => Ok(Self::Cromwell),
            other => Err(UnknownContainerEnv(other.to_string())),
        }
    }
}

/// Docker Swarm connection settings. Every field is optional; unset fields
/// fall back to the Docker client defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SwarmSettings {
    /// Docker daemon address (`DOCKER_HOST`)
    pub docker_host: Option<String>,
    /// TLS verification flag (`DOCKER_TLS_VERIFY`)
    pub docker_tls_verify: Option<u32>,
    /// Client certificate directory (`DOCKER_CERT_PATH`)
    pub docker_cert_path: Option<String>,
}

/// Kubernetes job placement settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KubernetesSettings {
    /// Namespace jobs are scheduled into
    pub job_namespace: String,
    /// `securityContext.runAsUser` applied to job pods
    pub run_as_user: Option<u32>,
    /// `securityContext.runAsGroup` applied to job pods
    pub run_as_group: Option<u32>,
}

/// Cromwell workflow engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CromwellSettings {
    /// Cromwell server base URL
    pub url: String,
    /// Wall-clock limit applied to submitted workflows
    pub timelimit_minutes: u32,
}

/// Orchestration backend together with the settings only it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerBackend {
    /// Jobs run as Swarm services
    Swarm(SwarmSettings),
    /// Jobs run as Kubernetes jobs
    Kubernetes(KubernetesSettings),
    /// Jobs are submitted as Cromwell workflows
    Cromwell(CromwellSettings),
}

impl ContainerBackend {
    /// Selector value this backend was built from
    pub const fn container_env(&self) -> ContainerEnv {
        match self {
            Self::Swarm(_) => ContainerEnv::Swarm,
            Self::Kubernetes(_) => ContainerEnv::Kubernetes,
            Self::Cromwell(_) => ContainerEnv::Cromwell,
        }
    }
}

/// Where job input and output data lives (`STORAGE_TYPE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Directory on the host running the jobs
    Host {
        /// Root directory of job data
        storebase: PathBuf,
    },
    /// NFS export mounted into job containers
    Nfs {
        /// Mount point of the export
        storebase: PathBuf,
        /// NFS server address
        nfs_server: String,
    },
    /// Any other storage type; its settings are validated by the storage driver
    Other {
        /// Raw `STORAGE_TYPE` value
        storage_type: String,
    },
}

impl StorageBackend {
    /// Selector value this backend was built from
    pub fn storage_type(&self) -> &str {
        match self {
            Self::Host { .. } => "host",
            Self::Nfs { .. } => "nfs",
            Self::Other { storage_type } => storage_type,
        }
    }

    /// Job data root, for host and NFS storage
    pub fn storebase(&self) -> Option<&Path> {
        match self {
            Self::Host { storebase } | Self::Nfs { storebase, .. } => Some(storebase),
            Self::Other { .. } => None,
        }
    }
}

/// Production signing secret. Never printed or serialized in clear text.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

const REDACTED: &str = "**redacted**";

impl SecretKey {
    /// Wrap a secret value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Clear-text secret, for the code that signs with it
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&REDACTED).finish()
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// Resolved process configuration.
///
/// Built once at startup by
/// [`ConfigLoader`](crate::infrastructure::config::ConfigLoader) and read-only
/// afterwards. Settings that belong to an inactive backend are not represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub(crate) debug: bool,
    pub(crate) testing: bool,
    pub(crate) deployment_mode: DeploymentMode,
    pub(crate) server_version: String,
    pub(crate) job_logs_tail: u32,
    pub(crate) container: ContainerBackend,
    pub(crate) storage: StorageBackend,
    pub(crate) remove_jobs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) secret_key: Option<SecretKey>,
}

impl Configuration {
    /// Debug flag of the build variant
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Testing flag of the build variant
    pub const fn testing(&self) -> bool {
        self.testing
    }

    /// Build variant the configuration was resolved for
    pub const fn deployment_mode(&self) -> DeploymentMode {
        self.deployment_mode
    }

    /// Package version of the running service
    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    /// Maximum number of job log lines returned to clients
    pub const fn job_logs_tail(&self) -> u32 {
        self.job_logs_tail
    }

    /// Active orchestration backend and its settings
    pub const fn container(&self) -> &ContainerBackend {
        &self.container
    }

    /// Active `CONTAINER_ENV`
    pub const fn container_env(&self) -> ContainerEnv {
        self.container.container_env()
    }

    /// Active storage backend and its settings
    pub const fn storage(&self) -> &StorageBackend {
        &self.storage
    }

    /// Active `STORAGE_TYPE`
    pub fn storage_type(&self) -> &str {
        self.storage.storage_type()
    }

    /// Whether finished jobs are removed from the orchestrator
    pub const fn remove_jobs(&self) -> bool {
        self.remove_jobs
    }

    /// Present in production only
    pub const fn secret_key(&self) -> Option<&SecretKey> {
        self.secret_key.as_ref()
    }
}
