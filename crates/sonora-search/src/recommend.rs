//! "Songs like this one" over the numeric feature index.

use sonora_core::{Corpus, SelfExclusion};

use crate::error::{SearchError, SearchResult};
use crate::numeric::NumericFeatureIndex;
use crate::ranking::{rank, Pagination, RankedResult, RankingPipeline};
use crate::scorer::score_all;

/// Content-similarity recommendations for a named track.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationService<'a> {
    corpus: &'a Corpus,
    index: &'a NumericFeatureIndex,
    exclusion: SelfExclusion,
}

impl<'a> RecommendationService<'a> {
    #[must_use]
    pub const fn new(
        corpus: &'a Corpus,
        index: &'a NumericFeatureIndex,
        exclusion: SelfExclusion,
    ) -> Self {
        Self {
            corpus,
            index,
            exclusion,
        }
    }

    /// Corpus position of the first track named exactly `track_name`.
    pub fn resolve(&self, track_name: &str) -> SearchResult<usize> {
        self.corpus
            .position_of(track_name)
            .ok_or_else(|| SearchError::NotFound {
                track_name: track_name.to_string(),
            })
    }

    /// Every other track ranked by similarity to the track at `position`.
    ///
    /// Always one entry shorter than the corpus; which entry goes depends on
    /// the [`SelfExclusion`] policy.
    pub fn neighbours(&self, position: usize) -> SearchResult<Vec<RankedResult>> {
        let row = self.index.row(position).ok_or_else(|| {
            SearchError::Corpus(sonora_core::Error::NotFound {
                entity: "feature row at position",
                key: position.to_string(),
            })
        })?;

        let mut ranked = rank(&score_all(row, self.index.rows()));
        let drop_at = match self.exclusion {
            SelfExclusion::Identity => ranked.iter().position(|r| r.index == position),
            SelfExclusion::RankZero => (!ranked.is_empty()).then_some(0),
        };
        if let Some(at) = drop_at {
            ranked.remove(at);
        }
        Ok(ranked)
    }

    /// One page of deduplicated recommendations for `track_name`.
    pub fn recommend(
        &self,
        track_name: &str,
        pagination: Pagination,
    ) -> SearchResult<Vec<RankedResult>> {
        let position = self.resolve(track_name)?;
        log::debug!(
            "Recommending for '{}' (position {}, {} policy)",
            track_name,
            position,
            self.exclusion
        );
        let ranked = self.neighbours(position)?;
        RankingPipeline::new(self.corpus).page(ranked, pagination)
    }
}
