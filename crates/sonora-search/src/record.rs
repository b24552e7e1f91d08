//! Caller-facing track records.

use serde::{Deserialize, Serialize};
use sonora_core::Track;

/// Decimal places kept on recommendation scores.
pub const RECOMMEND_SCORE_PRECISION: u32 = 3;
/// Decimal places kept on title-search scores.
pub const SEARCH_SCORE_PRECISION: u32 = 4;

/// A track as returned to callers, optionally with its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track_name: String,
    pub artist: String,
    pub album: String,
    pub release_year: String,
    pub genre: String,
    pub popularity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl TrackRecord {
    /// A record with no score, for plain catalog listings.
    #[must_use]
    pub fn from_track(track: &Track) -> Self {
        Self {
            track_name: track.track_name.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            release_year: track.release_year.clone(),
            genre: track.genre.clone(),
            popularity: track.popularity,
            score: None,
        }
    }

    /// A record carrying `score` rounded to `precision` decimal places.
    #[must_use]
    pub fn scored(track: &Track, score: f64, precision: u32) -> Self {
        Self {
            score: Some(round_to(score, precision)),
            ..Self::from_track(track)
        }
    }
}

/// Round half away from zero to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    (value * factor).round() / factor
}
