//! Standardized audio-feature matrix.

use sonora_core::{Corpus, Track};

use crate::error::{SearchError, SearchResult};

/// Dense N × F matrix of z-scored audio features, row `i` aligned with
/// corpus position `i`.
///
/// Each column is standardized with the population mean and standard
/// deviation of the whole corpus. A column with no variance is all zeros.
#[derive(Debug, Clone)]
pub struct NumericFeatureIndex {
    features: Vec<String>,
    means: Vec<f64>,
    std_devs: Vec<f64>,
    /// Row-major, `rows * features.len()` values.
    values: Vec<f64>,
    rows: usize,
}

impl NumericFeatureIndex {
    /// Parse and standardize `feature_names` for every track.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidFeature`] if no features are given, or if
    /// any track lacks a feature column or holds a value that is not a finite
    /// number.
    pub fn build<S: AsRef<str>>(corpus: &Corpus, feature_names: &[S]) -> SearchResult<Self> {
        if feature_names.is_empty() {
            return Err(SearchError::InvalidFeature {
                feature: String::new(),
                reason: "no feature columns configured".to_string(),
            });
        }

        let features: Vec<String> = feature_names
            .iter()
            .map(|f| f.as_ref().to_string())
            .collect();
        let dims = features.len();
        let rows = corpus.len();

        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(dims);
        for feature in &features {
            columns.push(parse_column(corpus, feature)?);
        }

        let mut means = Vec::with_capacity(dims);
        let mut std_devs = Vec::with_capacity(dims);
        for (feature, column) in features.iter().zip(&mut columns) {
            let (mean, std_dev) = standardize(feature, column)?;
            means.push(mean);
            std_devs.push(std_dev);
        }

        let mut values = Vec::with_capacity(rows * dims);
        for row in 0..rows {
            values.extend(columns.iter().map(|column| column[row]));
        }

        log::info!(
            "Built numeric feature index: {} tracks x {} features",
            rows,
            dims
        );

        Ok(Self {
            features,
            means,
            std_devs,
            values,
            rows,
        })
    }

    /// Number of rows (tracks).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of feature columns.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.features.len()
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Population mean of each raw column, in feature order.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Population standard deviation of each raw column, in feature order.
    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let dims = self.dimensions();
        let start = index.checked_mul(dims)?;
        self.values.get(start..start + dims)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.dimensions())
    }
}

/// Build the standardized feature matrix for `corpus`.
pub fn build_numeric_index<S: AsRef<str>>(
    corpus: &Corpus,
    feature_names: &[S],
) -> SearchResult<NumericFeatureIndex> {
    NumericFeatureIndex::build(corpus, feature_names)
}

fn parse_column(corpus: &Corpus, feature: &str) -> SearchResult<Vec<f64>> {
    corpus
        .iter()
        .map(|track| parse_value(track, feature))
        .collect()
}

fn parse_value(track: &Track, feature: &str) -> SearchResult<f64> {
    let raw = track
        .attribute(feature)
        .ok_or_else(|| SearchError::InvalidFeature {
            feature: feature.to_string(),
            reason: format!(
                "column missing for track {} ('{}')",
                track.index, track.track_name
            ),
        })?;

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SearchError::InvalidFeature {
            feature: feature.to_string(),
            reason: format!(
                "non-numeric value '{}' for track {} ('{}')",
                raw, track.index, track.track_name
            ),
        }),
    }
}

/// Z-score `column` in place and return its `(mean, std_dev)`.
#[allow(clippy::cast_precision_loss)]
fn standardize(feature: &str, column: &mut [f64]) -> SearchResult<(f64, f64)> {
    let Some(&first) = column.first() else {
        return Ok((0.0, 0.0));
    };

    let n = column.len() as f64;
    let mean = column.iter().sum::<f64>() / n;
    let variance = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    // Finite inputs can still overflow the accumulators.
    if !mean.is_finite() || !std_dev.is_finite() {
        return Err(SearchError::InvalidFeature {
            feature: feature.to_string(),
            reason: format!("column statistics overflow (mean {mean}, std {std_dev})"),
        });
    }

    // Rounding in the mean can leave a tiny spurious deviation on a
    // constant column, so constancy is checked on the raw values.
    let constant = column
        .iter()
        .all(|x| (x - first).abs() <= f64::EPSILON * first.abs());

    if constant || std_dev == 0.0 {
        column.fill(0.0);
        return Ok((mean, 0.0));
    }

    for x in column.iter_mut() {
        *x = (*x - mean) / std_dev;
    }
    Ok((mean, std_dev))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str, features: &[(&str, &str)]) -> Track {
        features
            .iter()
            .fold(Track::new(name, "artist"), |t, (k, v)| t.with_attribute(*k, *v))
    }

    fn corpus() -> Corpus {
        Corpus::new(vec![
            track("a", &[("energy", "0.1"), ("tempo", "90"), ("mode", "1")]),
            track("b", &[("energy", "0.5"), ("tempo", "120"), ("mode", "1")]),
            track("c", &[("energy", "0.9"), ("tempo", "180"), ("mode", "1")]),
            track("d", &[("energy", "0.3"), ("tempo", "60"), ("mode", "1")]),
        ])
    }

    #[test]
    fn test_columns_are_standardized() {
        let index = build_numeric_index(&corpus(), &["energy", "tempo"]).unwrap();
        assert_eq!(index.len(), 4);
        assert_eq!(index.dimensions(), 2);

        for col in 0..index.dimensions() {
            let column: Vec<f64> = index.rows().map(|r| r[col]).collect();
            let mean = column.iter().sum::<f64>() / 4.0;
            let var = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 4.0;
            assert!(mean.abs() < 1e-6, "column {col} mean {mean}");
            assert!((var.sqrt() - 1.0).abs() < 1e-6, "column {col} std {}", var.sqrt());
        }
    }

    #[test]
    fn test_known_values() {
        let index = build_numeric_index(&corpus(), &["tempo"]).unwrap();
        // tempo: mean 112.5, population std sqrt(1968.75)
        assert!((index.means()[0] - 112.5).abs() < 1e-12);
        let std = 1968.75_f64.sqrt();
        assert!((index.std_devs()[0] - std).abs() < 1e-12);
        let row = index.row(2).unwrap();
        assert!((row[0] - (180.0 - 112.5) / std).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_column_is_zero() {
        let index = build_numeric_index(&corpus(), &["energy", "mode"]).unwrap();
        assert!(index.rows().all(|r| r[1] == 0.0));
        assert!(index.std_devs()[1].abs() < f64::EPSILON);
    }

    #[test]
    fn test_repeating_decimal_constant_column_is_zero() {
        let corpus = Corpus::new(
            (0..7)
                .map(|i| track(&i.to_string(), &[("valence", "0.1")]))
                .collect(),
        );
        let index = build_numeric_index(&corpus, &["valence"]).unwrap();
        assert!(index.rows().all(|r| r[0] == 0.0));
    }

    #[test]
    fn test_missing_column() {
        let err = build_numeric_index(&corpus(), &["energy", "liveness"]).unwrap_err();
        match err {
            SearchError::InvalidFeature { feature, .. } => assert_eq!(feature, "liveness"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_value() {
        let corpus = Corpus::new(vec![
            track("a", &[("tempo", "120")]),
            track("b", &[("tempo", "fast")]),
        ]);
        let err = build_numeric_index(&corpus, &["tempo"]).unwrap_err();
        assert!(err.is_invalid_feature());
        assert!(err.to_string().contains("fast"));
    }

    #[test]
    fn test_non_finite_value() {
        let corpus = Corpus::new(vec![track("a", &[("tempo", "NaN")])]);
        assert!(build_numeric_index(&corpus, &["tempo"]).is_err());
    }

    #[test]
    fn test_overflowing_column_is_rejected() {
        let corpus = Corpus::new(vec![
            track("a", &[("loudness", "1e308")]),
            track("b", &[("loudness", "1e308")]),
            track("c", &[("loudness", "-1e308")]),
        ]);
        let err = build_numeric_index(&corpus, &["loudness"]).unwrap_err();
        match err {
            SearchError::InvalidFeature { feature, reason } => {
                assert_eq!(feature, "loudness");
                assert!(reason.contains("overflow"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_features() {
        let empty: [&str; 0] = [];
        assert!(build_numeric_index(&corpus(), &empty).is_err());
    }

    #[test]
    fn test_empty_corpus() {
        let index = build_numeric_index(&Corpus::default(), &["energy"]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.rows().count(), 0);
        assert!(index.row(0).is_none());
    }
}
