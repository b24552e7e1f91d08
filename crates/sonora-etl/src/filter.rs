//! Row filtering applied before the corpus is assembled.

use crate::loader::RawTable;

/// Cell values read as missing, in addition to the empty string.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "N/A", "NA", "n/a", "<NA>", "NULL", "null", "NaN", "nan", "-NaN", "-nan", "None",
];

/// Chainable row filters over a [`RawTable`].
///
/// ```
/// # use sonora_etl::{DataFilter, RawTable};
/// let csv = "track_name,artists,popularity,duration_ms\nA,x,80,200000\nB,,90,200000\n";
/// let table = DataFilter::new(RawTable::from_reader(csv.as_bytes()).unwrap())
///     .remove_missing()
///     .filter_popularity(30)
///     .filter_duration(90_000)
///     .into_table();
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DataFilter {
    table: RawTable,
}

impl DataFilter {
    #[must_use]
    pub fn new(table: RawTable) -> Self {
        Self { table }
    }

    /// Drop every row with a missing value in any column.
    #[must_use]
    pub fn remove_missing(self) -> Self {
        self.apply("remove_missing", |row| !row.iter().any(|cell| is_missing(cell)))
    }

    /// Keep rows whose `popularity` is at least `min`.
    ///
    /// A no-op when the column is absent. Unparseable values are dropped.
    #[must_use]
    pub fn filter_popularity(self, min: i64) -> Self {
        self.filter_at_least("popularity", min)
    }

    /// Keep rows whose `duration_ms` is at least `min_ms`.
    ///
    /// A no-op when the column is absent. Unparseable values are dropped.
    #[must_use]
    pub fn filter_duration(self, min_ms: i64) -> Self {
        self.filter_at_least("duration_ms", min_ms)
    }

    #[must_use]
    pub fn into_table(self) -> RawTable {
        self.table
    }

    #[allow(clippy::cast_precision_loss)]
    fn filter_at_least(self, column: &str, min: i64) -> Self {
        let Some(col) = self.table.column(column) else {
            log::debug!("No '{}' column, skipping threshold filter", column);
            return self;
        };
        let min = min as f64;
        self.apply(column, |row| {
            row.get(col)
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .is_some_and(|value| value >= min)
        })
    }

    fn apply<F>(self, name: &str, keep: F) -> Self
    where
        F: FnMut(&[String]) -> bool,
    {
        let before = self.table.len();
        let table = self.table.retain_rows(keep);
        let dropped = before - table.len();
        if dropped > 0 {
            log::info!("Filter '{}' dropped {} of {} rows", name, dropped, before);
        }
        Self { table }
    }
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}
