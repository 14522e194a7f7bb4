//! pman entry point.

use anyhow::{Context, Result};

use pman::{logging, ConfigLoader, DeploymentMode};

fn main() -> Result<()> {
    let mode = DeploymentMode::current();

    let config = ConfigLoader::load(mode).context("Failed to resolve pman configuration")?;
    logging::install(mode).context("Failed to install logging profile")?;

    let summary =
        serde_json::to_string(&config).context("Failed to serialize configuration summary")?;
    tracing::info!(
        version = config.server_version(),
        mode = %mode,
        container_env = %config.container_env(),
        storage_type = config.storage_type(),
        config = %summary,
        "pman configuration resolved"
    );

    Ok(())
}
