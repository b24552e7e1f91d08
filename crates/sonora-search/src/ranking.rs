//! Score ordering, duplicate collapsing and pagination.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use sonora_core::Corpus;

use crate::error::SearchResult;

/// A corpus position and its score within one index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResult {
    pub index: usize,
    pub score: f64,
}

impl RankedResult {
    #[must_use]
    pub const fn new(index: usize, score: f64) -> Self {
        Self { index, score }
    }
}

/// Highest score first; equal scores by ascending corpus position.
pub fn compare(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}

/// Rank every position of `scores`.
pub fn rank(scores: &[f64]) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| RankedResult::new(index, score))
        .collect();
    ranked.sort_by(compare);
    ranked
}

/// A 1-indexed page request.
///
/// `page < 1` reads as the first page; `per_page <= 0` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    #[must_use]
    pub const fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// Positions `[(page-1)*per_page, page*per_page)`, unbounded above.
    ///
    /// `None` when the page selects nothing or starts beyond addressable
    /// memory.
    pub fn window(&self) -> Option<Range<usize>> {
        if self.per_page <= 0 {
            return None;
        }
        let page = self.page.max(1);
        let start = (page - 1).checked_mul(self.per_page)?;
        let start = usize::try_from(start).ok()?;
        let per_page = usize::try_from(self.per_page).ok()?;
        Some(start..start.saturating_add(per_page))
    }

    /// The slice of `items` this page selects; empty past the end.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        match self.window() {
            Some(window) if window.start < items.len() => {
                items[window.start..window.end.min(items.len())].to_vec()
            }
            _ => Vec::new(),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// Collapses duplicate `(track_name, artist)` listings and pages the result.
///
/// Shared by title search and recommendations. Input must already be in
/// rank order; the first occurrence of each song is kept and relative order
/// is preserved.
#[derive(Debug, Clone, Copy)]
pub struct RankingPipeline<'a> {
    corpus: &'a Corpus,
}

impl<'a> RankingPipeline<'a> {
    #[must_use]
    pub const fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Every ranked entry whose song has not been seen earlier in the list.
    pub fn dedup<I>(&self, ranked: I) -> SearchResult<Vec<RankedResult>>
    where
        I: IntoIterator<Item = RankedResult>,
    {
        self.dedup_bounded(ranked, usize::MAX)
    }

    /// The deduplicated entries selected by `pagination`.
    ///
    /// Equivalent to paging the output of [`RankingPipeline::dedup`], but
    /// stops reading `ranked` once the page is full.
    pub fn page<I>(&self, ranked: I, pagination: Pagination) -> SearchResult<Vec<RankedResult>>
    where
        I: IntoIterator<Item = RankedResult>,
    {
        let Some(window) = pagination.window() else {
            return Ok(Vec::new());
        };
        let deduped = self.dedup_bounded(ranked, window.end)?;
        Ok(deduped.get(window.start..).map(<[_]>::to_vec).unwrap_or_default())
    }

    fn dedup_bounded<I>(&self, ranked: I, limit: usize) -> SearchResult<Vec<RankedResult>>
    where
        I: IntoIterator<Item = RankedResult>,
    {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut kept = Vec::new();
        for result in ranked {
            if kept.len() >= limit {
                break;
            }
            let track = self.corpus.track(result.index)?;
            if seen.insert(track.dedup_key()) {
                kept.push(result);
            }
        }
        Ok(kept)
    }
}
