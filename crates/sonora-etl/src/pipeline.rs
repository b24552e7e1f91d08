//! Load → filter → corpus, the startup ingestion path.

use sonora_core::{Corpus, Track};

use crate::config::Config;
use crate::error::{LoadError, LoadResult};
use crate::filter::DataFilter;
use crate::loader::RawTable;

/// Source columns mapped onto named [`Track`] fields. Everything else is
/// kept as a raw attribute.
const TRACK_NAME: &str = "track_name";
const ARTISTS: &str = "artists";
const ALBUM: &str = "album_name";
const GENRE: &str = "track_genre";
const POPULARITY: &str = "popularity";
const RELEASE_YEAR: &str = "release_year";

/// Load, clean and assemble the catalog named by `config`.
///
/// # Errors
/// Fails if the file cannot be read or parsed, has no rows, or lacks the
/// `track_name` / `artists` columns.
pub fn load_corpus(config: &Config) -> LoadResult<Corpus> {
    let raw = RawTable::from_path(&config.data_path)?;
    let cleaned = DataFilter::new(raw)
        .remove_missing()
        .filter_popularity(config.min_popularity)
        .filter_duration(config.min_duration_ms)
        .into_table();
    assemble_corpus(cleaned)
}

/// Turn cleaned rows into tracks, in row order.
pub fn assemble_corpus(table: RawTable) -> LoadResult<Corpus> {
    let name_col = table
        .column(TRACK_NAME)
        .ok_or(LoadError::MissingColumn(TRACK_NAME))?;
    let artist_col = table
        .column(ARTISTS)
        .ok_or(LoadError::MissingColumn(ARTISTS))?;
    let album_col = table.column(ALBUM);
    let genre_col = table.column(GENRE);
    let popularity_col = table.column(POPULARITY);
    let year_col = table.column(RELEASE_YEAR);

    let (headers, rows) = table.into_parts();
    let mapped = [
        Some(name_col),
        Some(artist_col),
        album_col,
        genre_col,
        popularity_col,
        year_col,
    ];

    let tracks = rows.into_iter().map(|row| {
        let cell = |col: Option<usize>| col.and_then(|c| row.get(c)).cloned().unwrap_or_default();

        let mut track = Track::new(cell(Some(name_col)), cell(Some(artist_col)))
            .with_album(cell(album_col))
            .with_genre(cell(genre_col))
            .with_release_year(cell(year_col));
        if let Some(popularity) = parse_popularity(&cell(popularity_col)) {
            track = track.with_popularity(popularity);
        }

        for (col, header) in headers.iter().enumerate() {
            if !mapped.contains(&Some(col)) {
                if let Some(value) = row.get(col) {
                    track = track.with_attribute(header.clone(), value.clone());
                }
            }
        }
        track
    });

    let corpus: Corpus = tracks.collect();
    log::info!("Assembled corpus of {} tracks", corpus.len());
    Ok(corpus)
}

#[allow(clippy::cast_possible_truncation)]
fn parse_popularity(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> RawTable {
        RawTable::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_assemble_maps_columns() {
        let corpus = assemble_corpus(table(
            "\
,track_id,artists,album_name,track_name,popularity,track_genre,energy
0,abc,Portishead,Dummy,Roads,64.0,trip-hop,0.28
1,def,Bonobo,Migration,Kerala,58,downtempo,0.71
",
        ))
        .unwrap();

        assert_eq!(corpus.len(), 2);
        let roads = corpus.get(0).unwrap();
        assert_eq!(roads.index, 0);
        assert_eq!(roads.track_name, "Roads");
        assert_eq!(roads.artist, "Portishead");
        assert_eq!(roads.album, "Dummy");
        assert_eq!(roads.genre, "trip-hop");
        assert_eq!(roads.popularity, Some(64));
        assert_eq!(roads.release_year, "");
        assert_eq!(roads.attribute("energy"), Some("0.28"));
        assert_eq!(roads.attribute("track_id"), Some("abc"));
        assert_eq!(roads.attribute("track_name"), None);

        let kerala = corpus.get(1).unwrap();
        assert_eq!(kerala.index, 1);
        assert_eq!(kerala.popularity, Some(58));
    }

    #[test]
    fn test_optional_columns_default() {
        let corpus = assemble_corpus(table("track_name,artists\nRoads,Portishead\n")).unwrap();
        let track = corpus.get(0).unwrap();
        assert!(track.album.is_empty());
        assert!(track.genre.is_empty());
        assert!(track.popularity.is_none());
    }

    #[test]
    fn test_missing_required_column() {
        let err = assemble_corpus(table("track_name,album_name\nRoads,Dummy\n")).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("artists")));
    }

    #[test]
    fn test_parse_popularity() {
        assert_eq!(parse_popularity("42"), Some(42));
        assert_eq!(parse_popularity(" 42.0 "), Some(42));
        assert_eq!(parse_popularity("popular"), None);
        assert_eq!(parse_popularity(""), None);
    }
}
