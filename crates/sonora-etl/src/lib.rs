//! Catalog ingestion and configuration for sonora.
//!
//! Loads the track CSV, drops incomplete and low-signal rows, and assembles
//! the immutable [`Corpus`](sonora_core::Corpus) the search engine is built
//! from.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;

pub use config::Config;
pub use error::{LoadError, LoadResult};
pub use filter::DataFilter;
pub use loader::RawTable;
pub use pipeline::load_corpus;
