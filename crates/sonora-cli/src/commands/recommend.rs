use anyhow::{Context, Result};
use sonora_etl::Config;
use sonora_search::{Pagination, SearchError};

use super::engine::build_engine;

pub fn run_recommend(
    config: &Config,
    track: &str,
    page: i64,
    per_page: Option<i64>,
) -> Result<()> {
    let engine = build_engine(config)?;
    let pagination = Pagination::new(page, per_page.unwrap_or(config.recommend_per_page));

    let records = match engine.recommend(track, pagination) {
        Ok(records) => records,
        Err(SearchError::NotFound { track_name }) => {
            anyhow::bail!(
                "No track named '{track_name}' in the catalog\n\n\
                 Titles must match exactly; try `sonora search {track_name}` first."
            );
        }
        Err(e) => return Err(e).context("Recommendation failed"),
    };

    let json = serde_json::to_string_pretty(&records).context("Failed to encode results")?;
    println!("{json}");

    Ok(())
}
