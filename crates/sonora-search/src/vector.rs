//! Dense and sparse vector arithmetic shared by both indexes.

use std::collections::BTreeMap;

/// The two operations cosine scoring needs.
pub trait VectorOps {
    fn dot(&self, other: &Self) -> f64;

    /// Euclidean norm.
    fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl VectorOps for [f64] {
    fn dot(&self, other: &Self) -> f64 {
        self.iter().zip(other).map(|(a, b)| a * b).sum()
    }
}

/// A sparse vector of `(term id, weight)` pairs, sorted by term id.
///
/// Term ids are unique and zero weights are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unordered pairs; weights for a repeated term are summed.
    #[must_use]
    pub fn new(pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (term, weight) in pairs {
            *merged.entry(term).or_insert(0.0) += weight;
        }
        Self {
            entries: merged.into_iter().filter(|(_, w)| *w != 0.0).collect(),
        }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of stored (non-zero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of `term`, zero when absent.
    #[must_use]
    pub fn get(&self, term: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Scale to unit L2 norm. A zero vector stays zero.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let norm = self.magnitude();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
        self
    }
}

impl VectorOps for SparseVector {
    fn dot(&self, other: &Self) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_dot_and_magnitude() {
        let a: &[f64] = &[3.0, 4.0];
        let b: &[f64] = &[1.0, 2.0];
        assert!((a.dot(b) - 11.0).abs() < 1e-12);
        assert!((a.magnitude() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_sparse_new_sorts_and_merges() {
        let v = SparseVector::new([(5, 1.0), (2, 2.0), (5, 0.5), (9, 0.0)]);
        assert_eq!(v.entries(), &[(2, 2.0), (5, 1.5)]);
        assert!((v.get(5) - 1.5).abs() < 1e-12);
        assert!(v.get(9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sparse_dot_only_shared_terms() {
        let a = SparseVector::new([(1, 2.0), (3, 1.0), (7, 4.0)]);
        let b = SparseVector::new([(0, 9.0), (3, 3.0), (7, 0.5)]);
        assert!((a.dot(&b) - 5.0).abs() < 1e-12);
        assert!((b.dot(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized() {
        let v = SparseVector::new([(0, 3.0), (1, 4.0)]).normalized();
        assert!((v.magnitude() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.6).abs() < 1e-12);

        let zero = SparseVector::default().normalized();
        assert!(zero.is_empty());
        assert!(zero.magnitude().abs() < f64::EPSILON);
    }
}
