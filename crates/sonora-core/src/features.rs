/// Audio-feature columns used for content similarity when none are configured.
pub const DEFAULT_FEATURES: &[&str] = &[
    "danceability",
    "energy",
    "tempo",
    "valence",
    "loudness",
    "speechiness",
    "acousticness",
];

/// [`DEFAULT_FEATURES`] as owned strings, for configuration defaults.
#[must_use]
pub fn default_features() -> Vec<String> {
    DEFAULT_FEATURES.iter().map(|f| (*f).to_string()).collect()
}
