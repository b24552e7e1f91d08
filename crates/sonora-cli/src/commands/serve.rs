use anyhow::Result;
use sonora_etl::Config;
use std::sync::Arc;

use super::engine::build_engine;
use crate::api::{self, AppContext};

/// Build the engine once and serve it over HTTP until interrupted.
pub async fn run_serve(config: Config, bind: Option<String>) -> Result<()> {
    let engine = build_engine(&config)?;
    let bind = bind.unwrap_or_else(|| config.bind_address.clone());

    let ctx = AppContext {
        engine: Arc::new(engine),
        search_per_page: config.search_per_page,
        recommend_per_page: config.recommend_per_page,
        sample_size: config.sample_size,
    };

    api::run(&bind, ctx).await
}
