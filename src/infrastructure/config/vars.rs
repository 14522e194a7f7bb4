//! Environment variable names and defaults read at startup.
//!
//! | Variable | Applies to | Default |
//! |----------|------------|---------|
//! | `JOB_LOGS_TAIL` | always | `1000` |
//! | `CONTAINER_ENV` | always | `swarm` |
//! | `STORAGE_TYPE` | always | `host` |
//! | `REMOVE_JOBS` | always | `yes` |
//! | `STOREBASE` | `STORAGE_TYPE` = `host` or `nfs` | required |
//! | `NFS_SERVER` | `STORAGE_TYPE` = `nfs` | required |
//! | `DOCKER_HOST` | `CONTAINER_ENV` = `swarm` | unset |
//! | `DOCKER_TLS_VERIFY` | `CONTAINER_ENV` = `swarm` | unset |
//! | `DOCKER_CERT_PATH` | `CONTAINER_ENV` = `swarm` | unset |
//! | `JOB_NAMESPACE` | `CONTAINER_ENV` = `kubernetes` | `default` |
//! | `SECURITYCONTEXT_RUN_AS_USER` | `CONTAINER_ENV` = `kubernetes` | unset |
//! | `SECURITYCONTEXT_RUN_AS_GROUP` | `CONTAINER_ENV` = `kubernetes` | unset |
//! | `CROMWELL_URL` | `CONTAINER_ENV` = `cromwell` | required |
//! | `TIMELIMIT_MINUTES` | `CONTAINER_ENV` = `cromwell` | required |
//! | `SECRET_KEY` | production builds | required |

/// Maximum job log lines returned
pub const JOB_LOGS_TAIL: &str = "JOB_LOGS_TAIL";
/// Orchestration backend selector
pub const CONTAINER_ENV: &str = "CONTAINER_ENV";
/// Storage backend selector
pub const STORAGE_TYPE: &str = "STORAGE_TYPE";
/// Set to `no` to keep finished jobs
pub const REMOVE_JOBS: &str = "REMOVE_JOBS";

/// Job data root for host and NFS storage
pub const STOREBASE: &str = "STOREBASE";
/// NFS server address
pub const NFS_SERVER: &str = "NFS_SERVER";

/// Swarm daemon address
pub const DOCKER_HOST: &str = "DOCKER_HOST";
/// Swarm TLS verification flag
pub const DOCKER_TLS_VERIFY: &str = "DOCKER_TLS_VERIFY";
/// Swarm client certificate directory
pub const DOCKER_CERT_PATH: &str = "DOCKER_CERT_PATH";

/// Kubernetes namespace for jobs
pub const JOB_NAMESPACE: &str = "JOB_NAMESPACE";
/// Kubernetes pod `runAsUser`
pub const SECURITYCONTEXT_RUN_AS_USER: &str = "SECURITYCONTEXT_RUN_AS_USER";
/// Kubernetes pod `runAsGroup`
pub const SECURITYCONTEXT_RUN_AS_GROUP: &str = "SECURITYCONTEXT_RUN_AS_GROUP";

/// Cromwell server URL
pub const CROMWELL_URL: &str = "CROMWELL_URL";
/// Cromwell workflow time limit
pub const TIMELIMIT_MINUTES: &str = "TIMELIMIT_MINUTES";

/// Production signing secret
pub const SECRET_KEY: &str = "SECRET_KEY";

/// Default for [`JOB_LOGS_TAIL`]
pub const DEFAULT_JOB_LOGS_TAIL: u32 = 1000;
/// Default for [`CONTAINER_ENV`]
pub const DEFAULT_CONTAINER_ENV: &str = "swarm";
/// Default for [`STORAGE_TYPE`]
pub const DEFAULT_STORAGE_TYPE: &str = "host";
/// Default for [`JOB_NAMESPACE`]
pub const DEFAULT_JOB_NAMESPACE: &str = "default";
