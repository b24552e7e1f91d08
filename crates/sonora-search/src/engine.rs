//! The retrieval engine: a corpus plus every index built from it.

use rand::Rng;
use sonora_core::features::default_features;
use sonora_core::{Corpus, SelfExclusion};

use crate::error::SearchResult;
use crate::numeric::NumericFeatureIndex;
use crate::ranking::{Pagination, RankedResult, RankingPipeline};
use crate::recommend::RecommendationService;
use crate::record::{TrackRecord, RECOMMEND_SCORE_PRECISION, SEARCH_SCORE_PRECISION};
use crate::text::TextVectorIndex;
use crate::text_search::{TextSearchEngine, DEFAULT_TOP_K};

/// Build-time settings for an [`Engine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Numeric columns compared by recommendations, in order.
    pub features: Vec<String>,
    pub self_exclusion: SelfExclusion,
    /// Ranked titles considered by a search before deduplication.
    pub search_top_k: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            features: default_features(),
            self_exclusion: SelfExclusion::default(),
            search_top_k: DEFAULT_TOP_K,
        }
    }
}

/// Owns the corpus and both indexes built from it.
///
/// Built once; every query takes `&self` and touches no shared mutable
/// state, so an `Engine` can serve any number of concurrent callers.
#[derive(Debug)]
pub struct Engine {
    corpus: Corpus,
    numeric: NumericFeatureIndex,
    text: TextSearchEngine,
    options: EngineOptions,
}

impl Engine {
    /// Build both indexes over `corpus`.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidFeature`](crate::SearchError::InvalidFeature)
    /// if a configured feature column is absent or not numeric.
    pub fn build(corpus: Corpus, options: EngineOptions) -> SearchResult<Self> {
        log::info!("Building indexes over {} tracks", corpus.len());
        let numeric = NumericFeatureIndex::build(&corpus, &options.features)?;
        let text = TextSearchEngine::new(TextVectorIndex::build(&corpus));
        Ok(Self {
            corpus,
            numeric,
            text,
            options,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn numeric_index(&self) -> &NumericFeatureIndex {
        &self.numeric
    }

    pub fn text_index(&self) -> &TextVectorIndex {
        self.text.index()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Title search using the configured `search_top_k`.
    pub fn search(&self, query: &str, pagination: Pagination) -> SearchResult<Vec<TrackRecord>> {
        self.search_top_k(query, self.options.search_top_k, pagination)
    }

    /// Title search: the best `top_k` titles, deduplicated, then paged.
    pub fn search_top_k(
        &self,
        query: &str,
        top_k: usize,
        pagination: Pagination,
    ) -> SearchResult<Vec<TrackRecord>> {
        let (indices, scores) = self.text.search(query, top_k);
        let ranked = indices
            .into_iter()
            .map(|index| RankedResult::new(index, scores[index]));
        let page = RankingPipeline::new(&self.corpus).page(ranked, pagination)?;
        self.records(&page, SEARCH_SCORE_PRECISION)
    }

    /// One page of tracks similar to the first track named `track_name`.
    ///
    /// # Errors
    /// Returns [`SearchError::NotFound`](crate::SearchError::NotFound) when no
    /// track has that exact name.
    pub fn recommend(
        &self,
        track_name: &str,
        pagination: Pagination,
    ) -> SearchResult<Vec<TrackRecord>> {
        let page = self.recommendations().recommend(track_name, pagination)?;
        self.records(&page, RECOMMEND_SCORE_PRECISION)
    }

    /// The recommendation service over this engine's indexes.
    pub fn recommendations(&self) -> RecommendationService<'_> {
        RecommendationService::new(&self.corpus, &self.numeric, self.options.self_exclusion)
    }

    /// Up to `count` random catalog tracks, unscored.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<TrackRecord> {
        self.corpus
            .sample(count, rng)
            .into_iter()
            .map(TrackRecord::from_track)
            .collect()
    }

    fn records(&self, page: &[RankedResult], precision: u32) -> SearchResult<Vec<TrackRecord>> {
        page.iter()
            .map(|r| {
                let track = self.corpus.track(r.index)?;
                Ok(TrackRecord::scored(track, r.score, precision))
            })
            .collect()
    }
}
