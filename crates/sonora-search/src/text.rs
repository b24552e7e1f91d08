//! Character-n-gram TF-IDF index over track titles.

use std::collections::{BTreeSet, HashMap, HashSet};

use sonora_core::Corpus;

use crate::ngram::{char_ngrams, normalize};
use crate::vector::SparseVector;

/// Frozen n-gram vocabulary plus one L2-normalized TF-IDF row per title.
///
/// Weights use raw term counts and smoothed inverse document frequency,
/// `idf(t) = ln((1 + N) / (1 + df(t))) + 1`. Term ids follow the
/// lexicographic order of the n-grams.
#[derive(Debug, Clone, Default)]
pub struct TextVectorIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TextVectorIndex {
    /// Index every track title of `corpus`, in corpus order.
    #[must_use]
    pub fn build(corpus: &Corpus) -> Self {
        Self::from_titles(corpus.titles())
    }

    /// Index an ordered list of titles; row `i` belongs to title `i`.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let documents: Vec<Vec<String>> = titles
            .into_iter()
            .map(|t| char_ngrams(&normalize(t.as_ref())))
            .collect();

        let terms: BTreeSet<&str> = documents
            .iter()
            .flat_map(|grams| grams.iter().map(String::as_str))
            .collect();
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(id, term)| (term.to_string(), id))
            .collect();

        let mut doc_freq = vec![0_usize; vocabulary.len()];
        for grams in &documents {
            let unique: HashSet<usize> = grams
                .iter()
                .filter_map(|g| vocabulary.get(g))
                .copied()
                .collect();
            for id in unique {
                doc_freq[id] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::new(),
        };
        index.rows = documents.iter().map(|grams| index.weigh(grams)).collect();

        log::info!(
            "Built text index: {} titles, {} n-gram terms",
            index.rows.len(),
            index.vocabulary.len()
        );

        index
    }

    /// Number of rows (titles).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_id(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term_id: usize) -> Option<f64> {
        self.idf.get(term_id).copied()
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Project free text into this index's vector space.
    ///
    /// N-grams outside the vocabulary are dropped, so text sharing nothing
    /// with the catalog maps to the zero vector.
    #[must_use]
    pub fn vectorize(&self, text: &str) -> SparseVector {
        self.weigh(&char_ngrams(&normalize(text)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn weigh(&self, grams: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for id in grams.iter().filter_map(|g| self.vocabulary.get(g)) {
            *counts.entry(*id).or_insert(0) += 1;
        }
        SparseVector::new(
            counts
                .into_iter()
                .map(|(id, tf)| (id, tf as f64 * self.idf[id])),
        )
        .normalized()
    }
}

/// Build the title TF-IDF index for `corpus`.
#[must_use]
pub fn build_text_index(corpus: &Corpus) -> TextVectorIndex {
    TextVectorIndex::build(corpus)
}
