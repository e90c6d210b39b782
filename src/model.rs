// Core structs: TimeSeries, LifecycleResult, ProductMetadata
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;

/// One named interest column of a [`TimeSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Date-indexed interest table, one column per tracked entity.
///
/// All columns share one strictly ascending date axis. Missing dates are
/// never imputed; the source controls sampling density.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl TimeSeries {
    /// An empty table: no rows, no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table with the given date axis and no columns yet.
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self, TableError> {
        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(TableError::NotAscending {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self {
            dates,
            columns: Vec::new(),
        })
    }

    /// Appends a column; its length must match the date axis.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), TableError> {
        let name = name.into();
        if values.len() != self.dates.len() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.dates.len(),
                actual: values.len(),
            });
        }
        if self.column(&name).is_some() {
            return Err(TableError::DuplicateColumn(name));
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Builder-style variant of [`TimeSeries::add_column`].
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self, TableError> {
        self.add_column(name, values)?;
        Ok(self)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows (dates).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Peak and post-peak decline of one entity's smoothed interest.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleResult {
    pub peak_date: NaiveDate,
    /// Smoothed value at `peak_date`.
    pub peak_value: f64,
    pub decline_date: NaiveDate,
    pub duration: Duration,
}

/// Per-entity lifecycle outcome; `None` means no decline was found (or no data).
pub type LifecycleMap = HashMap<String, Option<LifecycleResult>>;

/// A product candidate scraped from the retail search page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductMetadata {
    pub model_id: String,
    pub brand: String,
    pub full_title: String,
    pub image_url: Option<String>,
    /// Spec label and value pairs, in page order.
    pub params: Vec<(String, String)>,
    pub price_range: Option<String>,
    pub stores: String,
    /// 0-5, half-point granularity.
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("dates must be strictly ascending: {next} follows {previous}")]
    NotAscending { previous: NaiveDate, next: NaiveDate },

    #[error("column {column} has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed response from {context}: {reason}")]
    InvalidResponse { context: String, reason: String },

    #[error("browser error: {0}")]
    Browser(String),

    #[error(transparent)]
    Parse(#[from] ParserError),

    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTML parse error: {0}")]
    HtmlParseError(String),

    #[error("missing element: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn rejects_non_ascending_dates() {
        let err = TimeSeries::new(vec![day(2), day(1)]).unwrap_err();
        assert!(matches!(err, TableError::NotAscending { .. }));
    }

    #[test]
    fn rejects_duplicate_dates() {
        assert!(TimeSeries::new(vec![day(1), day(1)]).is_err());
    }

    #[test]
    fn rejects_column_length_mismatch() {
        let table = TimeSeries::new(vec![day(1), day(2)]).unwrap();
        let err = table.with_column("a", vec![1.0]).unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_column_names() {
        let table = TimeSeries::new(vec![day(1)]).unwrap().with_column("a", vec![1.0]).unwrap();
        let err = table.with_column("a", vec![2.0]).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn(name) if name == "a"));
    }
}
