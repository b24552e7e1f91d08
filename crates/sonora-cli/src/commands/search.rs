use anyhow::{Context, Result};
use sonora_etl::Config;
use sonora_search::Pagination;

use super::engine::build_engine;

pub fn run_search(
    config: &Config,
    query: &str,
    page: i64,
    per_page: Option<i64>,
    top_k: Option<usize>,
) -> Result<()> {
    let engine = build_engine(config)?;
    let pagination = Pagination::new(page, per_page.unwrap_or(config.search_per_page));
    let top_k = top_k.unwrap_or(config.search_top_k);

    log::debug!("Searching '{query}' (top_k={top_k}, page={page})");
    let records = engine.search_top_k(query, top_k, pagination)?;

    let json = serde_json::to_string_pretty(&records).context("Failed to encode results")?;
    println!("{json}");

    Ok(())
}
