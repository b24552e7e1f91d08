use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single catalog track.
///
/// Tracks have no identifier of their own: `index` is the position of the
/// track inside its [`Corpus`](crate::Corpus) and is assigned when the corpus
/// is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub index: usize,
    pub track_name: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub popularity: Option<i64>,
    pub release_year: String,

    /// Remaining source columns (audio features etc.), unparsed.
    pub attributes: BTreeMap<String, String>,
}

impl Track {
    #[must_use]
    pub fn new(track_name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            index: 0,
            track_name: track_name.into(),
            artist: artist.into(),
            album: String::new(),
            genre: String::new(),
            popularity: None,
            release_year: String::new(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    #[must_use]
    pub fn with_popularity(mut self, popularity: i64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    #[must_use]
    pub fn with_release_year(mut self, year: impl Into<String>) -> Self {
        self.release_year = year.into();
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Raw value of a source column, if the track has it.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Identity used when collapsing duplicate listings of the same song.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.track_name, &self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_new() {
        let track = Track::new("So What", "Miles Davis");
        assert_eq!(track.track_name, "So What");
        assert_eq!(track.artist, "Miles Davis");
        assert!(track.album.is_empty());
        assert!(track.popularity.is_none());
    }

    #[test]
    fn test_track_builder() {
        let track = Track::new("So What", "Miles Davis")
            .with_album("Kind of Blue")
            .with_genre("jazz")
            .with_popularity(71)
            .with_release_year("1959")
            .with_attribute("tempo", "136.2");

        assert_eq!(track.album, "Kind of Blue");
        assert_eq!(track.popularity, Some(71));
        assert_eq!(track.attribute("tempo"), Some("136.2"));
        assert_eq!(track.attribute("energy"), None);
    }

    #[test]
    fn test_dedup_key_is_case_sensitive() {
        let a = Track::new("Blue", "Joni Mitchell");
        let b = Track::new("blue", "Joni Mitchell");
        assert_ne!(a.dedup_key(), b.dedup_key());
    }
}
