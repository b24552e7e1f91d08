//! Fuzzy title search over a [`TextVectorIndex`].

use crate::ngram::normalize;
use crate::ranking::rank;
use crate::scorer::score_all;
use crate::text::TextVectorIndex;

/// How many ranked positions a title search returns by default.
pub const DEFAULT_TOP_K: usize = 20;

/// Scores free-text queries against every indexed title.
#[derive(Debug, Clone)]
pub struct TextSearchEngine {
    index: TextVectorIndex,
}

impl TextSearchEngine {
    #[must_use]
    pub fn new(index: TextVectorIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &TextVectorIndex {
        &self.index
    }

    /// Rank every title against `query`.
    ///
    /// Returns the best `top_k` corpus positions (score descending, ties by
    /// ascending position) together with the full per-title score array. An
    /// empty or whitespace-only query returns two empty vectors.
    pub fn search(&self, query: &str, top_k: usize) -> (Vec<usize>, Vec<f64>) {
        if normalize(query).is_empty() {
            return (Vec::new(), Vec::new());
        }

        let vector = self.index.vectorize(query);
        log::debug!("Title query '{}' hit {} known n-grams", query, vector.nnz());

        let scores = score_all(&vector, self.index.rows());
        let ranked = rank(&scores)
            .into_iter()
            .take(top_k)
            .map(|r| r.index)
            .collect();
        (ranked, scores)
    }
}
