//! The `lingodrill fetch` command.

use std::path::PathBuf;

use anyhow::Result;

use lingodrill_content::config::load_config_from;
use lingodrill_content::file::save_pools;
use lingodrill_content::ContentApi;
use lingodrill_core::traits::{load_pools, ContentSource};

pub async fn execute(out: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let api = ContentApi::from_config(&config.api)?;

    eprintln!("Fetching content from {}", config.api.base_url);
    let pools = load_pools(&api, &config.pool_limits()).await;

    let failures = pools.failures();
    for (pool, reason) in &failures {
        eprintln!("Warning: {pool} pool failed: {reason}");
    }
    anyhow::ensure!(
        failures.len() < 3,
        "could not fetch any content from {}",
        api.name()
    );

    save_pools(&out, &pools).await?;

    let count = |n: Option<usize>| n.map_or_else(|| "failed".to_string(), |n| n.to_string());
    println!("Vocabulary: {}", count(pools.vocabs.items().map(<[_]>::len)));
    println!("Sentences:  {}", count(pools.sentences.items().map(<[_]>::len)));
    println!(
        "Reading:    {} ({} units)",
        count(pools.reading.items().map(<[_]>::len)),
        pools.units.len()
    );
    println!("Snapshot saved to: {}", out.display());

    Ok(())
}
