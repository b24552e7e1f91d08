use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use sonora_core::features::default_features;
use sonora_core::SelfExclusion;
use std::path::PathBuf;

/// Configuration for sonora.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SONORA_* prefix)
/// 3. Config file (~/.config/sonora/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the track catalog CSV.
    ///
    /// Can be set via:
    /// - CLI: --data /path/to/catalog.csv
    /// - ENV: SONORA_DATA_PATH
    /// - Config: data_path = "/path/to/catalog.csv"
    /// - Default: data/spotify.csv
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Numeric columns compared by recommendations.
    #[serde(default = "default_features")]
    pub features: Vec<String>,

    /// Rows less popular than this are dropped at load time.
    #[serde(default = "default_min_popularity")]
    pub min_popularity: i64,

    /// Rows shorter than this (milliseconds) are dropped at load time.
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: i64,

    /// Ranked titles a search considers before deduplication.
    #[serde(default = "default_search_top_k")]
    pub search_top_k: usize,

    #[serde(default = "default_search_per_page")]
    pub search_per_page: i64,

    #[serde(default = "default_recommend_per_page")]
    pub recommend_per_page: i64,

    /// Tracks listed by `songs`.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// How a recommendation drops the queried track from its own results.
    #[serde(default)]
    pub self_exclusion: SelfExclusion,

    /// Address the HTTP server listens on.
    ///
    /// Can be set via:
    /// - CLI: sonora serve --bind 0.0.0.0:8080
    /// - ENV: SONORA_BIND_ADDRESS
    /// - Config: bind_address = "0.0.0.0:8080"
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Logger settings.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            features: default_features(),
            min_popularity: default_min_popularity(),
            min_duration_ms: default_min_duration_ms(),
            search_top_k: default_search_top_k(),
            search_per_page: default_search_per_page(),
            recommend_per_page: default_recommend_per_page(),
            sample_size: default_sample_size(),
            self_exclusion: SelfExclusion::default(),
            bind_address: default_bind_address(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/sonora/config.toml
    /// Reads environment variables with SONORA_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("sonora");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with a custom catalog path.
    ///
    /// This is used when the --data CLI flag is provided.
    pub fn load_with_data_path(data_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.data_path = data_path;
        Ok(config)
    }

    /// Look up a single top-level setting, rendered as text.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = toml::Value::try_from(self).context("Failed to serialize configuration")?;
        Ok(value.get(key).map(|v| match v {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    /// The effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data").join("spotify.csv")
}

const fn default_min_popularity() -> i64 {
    30
}

const fn default_min_duration_ms() -> i64 {
    90_000
}

const fn default_search_top_k() -> usize {
    20
}

const fn default_search_per_page() -> i64 {
    5
}

const fn default_recommend_per_page() -> i64 {
    10
}

const fn default_sample_size() -> usize {
    10
}

fn default_bind_address() -> String {
    String::from("127.0.0.1:5000")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/sonora/config.toml
/// - macOS: ~/Library/Application Support/sonora/config.toml
/// - Windows: %APPDATA%\sonora\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sonora")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Sonora Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SONORA_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Track catalog (CSV with a header row)
#
# Required columns: track_name, artists, and every entry of `features`.
# Optional columns: album_name, track_genre, popularity, duration_ms,
# release_year.
#
# Can also be set via:
# - CLI: sonora --data /custom/catalog.csv search "hey jude"
# - Environment: SONORA_DATA_PATH=/custom/catalog.csv
data_path = "data/spotify.csv"

# Audio features compared by recommendations
features = [
    "danceability",
    "energy",
    "tempo",
    "valence",
    "loudness",
    "speechiness",
    "acousticness",
]

# Rows below these thresholds are dropped when the catalog is loaded
min_popularity = 30
min_duration_ms = 90000

# Search and paging
search_top_k = 20
search_per_page = 5
recommend_per_page = 10
sample_size = 10

# How a recommendation removes the queried track from its own results:
# - "identity": drop the queried track itself
# - "rank-zero": drop whatever ranks first (legacy; with tied top scores the
#   queried track can appear in its own list)
self_exclusion = "identity"

# HTTP server
bind_address = "127.0.0.1:5000"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
