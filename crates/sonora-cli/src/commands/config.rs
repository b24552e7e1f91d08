use anyhow::{Context, Result};
use sonora_etl::{config, Config};

const VALID_KEYS: &str = "data_path, features, min_popularity, min_duration_ms, search_top_k, \
                          search_per_page, recommend_per_page, sample_size, self_exclusion, \
                          bind_address, logging";

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  data_path: {}", config.data_path.display());
    println!("  features: {}", config.features.join(", "));
    println!("  min_popularity: {}", config.min_popularity);
    println!("  min_duration_ms: {}", config.min_duration_ms);
    println!("  search_top_k: {}", config.search_top_k);
    println!("  search_per_page: {}", config.search_per_page);
    println!("  recommend_per_page: {}", config.recommend_per_page);
    println!("  sample_size: {}", config.sample_size);
    println!("  self_exclusion: {}", config.self_exclusion);
    println!("  bind_address: {}", config.bind_address);
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (SONORA_*) > Config file > Defaults");

    Ok(())
}

/// Print one effective setting, or the raw config file when no key is given.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        match config.get(&key)? {
            Some(value) => println!("{value}"),
            None => anyhow::bail!("Unknown config key: {key}\n\nValid keys: {VALID_KEYS}"),
        }
    } else {
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{contents}");
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'sonora config init' to create it.");
        }
    }

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("Created config file: {}", config_path.display());
        println!("\nEdit this file to configure sonora.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
