use anyhow::{Context, Result};
use clap::Parser;
use sonora_etl::Config;
use std::path::PathBuf;

mod api;
mod commands;

#[derive(Debug, Parser)]
#[command(name = "sonora", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the track catalog CSV (default: data/spotify.csv)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Fuzzy-search track titles
    ///
    /// Titles are compared as bags of 3-5 character fragments, so partial
    /// words and small misspellings still match. Results are deduplicated by
    /// (title, artist) and printed as JSON.
    Search {
        /// Search text (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        page: i64,

        /// Results per page (default: search_per_page from config)
        #[arg(long, allow_hyphen_values = true)]
        per_page: Option<i64>,

        /// Ranked titles considered before deduplication (default: search_top_k)
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Recommend tracks that sound like a given track
    ///
    /// The track is looked up by exact title (first match wins). Similarity is
    /// cosine similarity over standardized audio features.
    Recommend {
        /// Exact track title
        track: String,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        page: i64,

        /// Results per page (default: recommend_per_page from config)
        #[arg(long, allow_hyphen_values = true)]
        per_page: Option<i64>,
    },
    /// List a random sample of catalog tracks
    Songs {
        /// Number of tracks (default: sample_size from config)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Serve the search and recommendation HTTP API
    Serve {
        /// Listen address (default: bind_address from config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one setting, or the whole config file when no key is given
    Get {
        key: Option<String>,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it does not exist
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.data {
        Some(path) => Config::load_with_data_path(path)?,
        None => Config::load()?,
    };

    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))
        .context("Logger initialization failed")?;

    match cli.command {
        Commands::Search {
            query,
            page,
            per_page,
            top_k,
        } => {
            commands::run_search(&config, &query.join(" "), page, per_page, top_k)?;
        }
        Commands::Recommend {
            track,
            page,
            per_page,
        } => {
            commands::run_recommend(&config, &track, page, per_page)?;
        }
        Commands::Songs { count } => {
            commands::list_songs(&config, count)?;
        }
        Commands::Serve { bind } => {
            commands::run_serve(config, bind).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
