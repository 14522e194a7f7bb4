//! Configuration value types.

pub mod config;

pub use config::{
    Configuration, ContainerBackend, ContainerEnv, CromwellSettings, DeploymentMode,
    KubernetesSettings, SecretKey, StorageBackend, SwarmSettings, UnknownContainerEnv,
};
