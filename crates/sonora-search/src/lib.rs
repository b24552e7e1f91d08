//! Vector-space retrieval for sonora.
//!
//! Builds a standardized audio-feature matrix and a character-n-gram TF-IDF
//! title index over a fixed [`Corpus`](sonora_core::Corpus), then answers
//! "songs like this one" and fuzzy title queries by exhaustive cosine
//! scoring. Everything here is built once and read-only afterwards.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod error;
pub mod ngram;
pub mod numeric;
pub mod ranking;
pub mod recommend;
pub mod record;
pub mod scorer;
pub mod text;
pub mod text_search;
pub mod vector;

pub use engine::{Engine, EngineOptions};
pub use error::{SearchError, SearchResult};
pub use numeric::{build_numeric_index, NumericFeatureIndex};
pub use ranking::{Pagination, RankedResult, RankingPipeline};
pub use recommend::RecommendationService;
pub use record::TrackRecord;
pub use scorer::{cosine_similarity, score_all};
pub use text::{build_text_index, TextVectorIndex};
pub use text_search::TextSearchEngine;
pub use vector::{SparseVector, VectorOps};
