use anyhow::{Context, Result};
use sonora_etl::Config;

use super::engine::build_engine;

/// Print a random sample of catalog tracks.
pub fn list_songs(config: &Config, count: Option<usize>) -> Result<()> {
    let engine = build_engine(config)?;
    let count = count.unwrap_or(config.sample_size);

    let records = engine.sample(count, &mut rand::thread_rng());

    let json = serde_json::to_string_pretty(&records).context("Failed to encode tracks")?;
    println!("{json}");

    Ok(())
}
