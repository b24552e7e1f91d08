use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::model::track::Track;

/// The immutable, ordered track catalog.
///
/// Position in the corpus is the only identity a track has; every index
/// built from a corpus keeps its rows in exactly this order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    tracks: Vec<Track>,
}

impl Corpus {
    /// Build a corpus, renumbering each track to its position.
    #[must_use]
    pub fn new(tracks: Vec<Track>) -> Self {
        let tracks = tracks
            .into_iter()
            .enumerate()
            .map(|(index, mut track)| {
                track.index = index;
                track
            })
            .collect::<Vec<_>>();
        log::debug!("Corpus built with {} tracks", tracks.len());
        Self { tracks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Like [`Corpus::get`], but out-of-range positions are an error.
    pub fn track(&self, index: usize) -> Result<&Track> {
        self.tracks.get(index).ok_or_else(|| Error::NotFound {
            entity: "track at position",
            key: index.to_string(),
        })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Position of the first track whose name matches exactly.
    pub fn position_of(&self, track_name: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.track_name == track_name)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|t| t.track_name.as_str())
    }

    /// Up to `count` distinct tracks picked at random.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&Track> {
        self.tracks.choose_multiple(rng, count).collect()
    }
}

impl FromIterator<Track> for Corpus {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
