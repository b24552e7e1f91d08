use anyhow::{Context, Result};
use sonora_etl::{load_corpus, Config};
use sonora_search::{Engine, EngineOptions};

/// Engine build settings taken from the configuration.
pub fn engine_options(config: &Config) -> EngineOptions {
    EngineOptions {
        features: config.features.clone(),
        self_exclusion: config.self_exclusion,
        search_top_k: config.search_top_k,
    }
}

/// Load the catalog and build every index over it.
pub fn build_engine(config: &Config) -> Result<Engine> {
    let corpus = load_corpus(config)
        .with_context(|| format!("Failed to load catalog {}", config.data_path.display()))?;

    Engine::build(corpus, engine_options(config)).context("Failed to build search indexes")
}
