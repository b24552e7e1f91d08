//! Raw CSV catalog loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{LoadError, LoadResult};

/// A headed table of unparsed CSV cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read a CSV file with a header row.
    ///
    /// # Errors
    /// Fails if the file cannot be opened, is not valid CSV, or has no data
    /// rows.
    pub fn from_path(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        log::info!("Loading catalog from {}", path.display());
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file).map_err(|e| match e {
            LoadError::Empty(_) => LoadError::Empty(path.display().to_string()),
            other => other,
        })
    }

    /// Read CSV with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> LoadResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Err(LoadError::Empty(String::from("<reader>")));
        }

        log::info!("Read {} rows x {} columns", rows.len(), headers.len());
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Keep only the rows matching `keep`.
    #[must_use]
    pub fn retain_rows<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| keep(row));
        self
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }
}
