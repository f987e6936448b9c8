pub mod drill;
pub mod fetch;
pub mod generate;
pub mod grade;
pub mod import;
pub mod init;
pub mod speed_round;
pub mod take;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use lingodrill_content::{ContentApi, FileContentSource, LingodrillConfig};
use lingodrill_core::session::SessionTelemetry;
use lingodrill_core::traits::{load_pools, Pools};

/// Load a pool snapshot with the configured limits. Fails if nothing at all
/// could be read.
pub(crate) async fn load_snapshot(dir: &Path, config: &LingodrillConfig) -> Result<Pools> {
    anyhow::ensure!(
        dir.is_dir(),
        "pool directory {} not found. Run `lingodrill fetch` first.",
        dir.display()
    );
    tracing::debug!(dir = %dir.display(), "loading pool snapshot");
    let source = FileContentSource::new(dir);
    let pools = load_pools(&source, &config.pool_limits()).await;
    let failures = pools.failures();
    for (pool, reason) in &failures {
        eprintln!("Warning: {pool} pool unavailable: {reason}");
    }
    anyhow::ensure!(failures.len() < 3, "no pool in {} could be loaded", dir.display());
    Ok(pools)
}

/// Session telemetry against the configured Content API, if tracking is on.
pub(crate) fn telemetry(track: bool, config: &LingodrillConfig) -> Result<Option<SessionTelemetry>> {
    if !track {
        return Ok(None);
    }
    let api = ContentApi::from_config(&config.api)?;
    Ok(Some(SessionTelemetry::new(Arc::new(api))))
}
