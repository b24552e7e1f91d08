//! End-to-end ingestion: CSV on disk → filtered, renumbered corpus.

use std::io::Write;

use sonora_etl::{load_corpus, Config, LoadError};
use tempfile::NamedTempFile;

const CATALOG: &str = "\
,track_id,artists,album_name,track_name,popularity,duration_ms,danceability,energy,tempo,valence,loudness,speechiness,acousticness,track_genre
0,t0,Daft Punk,Discovery,One More Time,77,320357,0.613,0.697,122.7,0.476,-8.618,0.133,0.0194,electro
1,t1,Daft Punk,Discovery,Short Intro,80,42000,0.5,0.5,120.0,0.5,-9.0,0.05,0.1,electro
2,t2,Unknown,Demo,Basement Tape,3,200000,0.4,0.3,90.0,0.2,-14.0,0.04,0.8,lo-fi
3,t3,Daft Punk,,Aerodynamic,70,212000,0.5,0.9,123.0,0.3,-6.0,0.06,0.01,electro
4,t4,Justice,Cross,D.A.N.C.E.,72,242000,0.8,0.8,113.0,0.9,-5.0,0.1,0.02,electro
";

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn config_for(file: &NamedTempFile) -> Config {
    Config {
        data_path: file.path().to_path_buf(),
        ..Config::default()
    }
}

#[test]
fn test_load_corpus_applies_every_filter() {
    let file = write_catalog(CATALOG);
    let corpus = load_corpus(&config_for(&file)).unwrap();

    let titles: Vec<&str> = corpus.titles().collect();
    assert_eq!(titles, vec!["One More Time", "D.A.N.C.E."]);

    // Positions are reassigned after filtering.
    assert_eq!(corpus.get(1).unwrap().index, 1);
    assert_eq!(corpus.get(1).unwrap().attribute("tempo"), Some("113.0"));
}

#[test]
fn test_thresholds_come_from_config() {
    let file = write_catalog(CATALOG);
    let config = Config {
        min_popularity: 0,
        min_duration_ms: 0,
        ..config_for(&file)
    };
    let corpus = load_corpus(&config).unwrap();
    // Only the row with an empty album is dropped.
    assert_eq!(corpus.len(), 4);
}

#[test]
fn test_empty_catalog_is_an_error() {
    let file = write_catalog("track_name,artists\n");
    let err = load_corpus(&config_for(&file)).unwrap_err();
    assert!(matches!(err, LoadError::Empty(_)));
}

#[test]
fn test_missing_catalog_is_an_error() {
    let config = Config {
        data_path: "/definitely/not/here.csv".into(),
        ..Config::default()
    };
    assert!(matches!(load_corpus(&config), Err(LoadError::Io { .. })));
}
