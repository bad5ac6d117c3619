//! CSV Metrics Loader Module
//! Handles measurement CSV loading and typed row extraction using Polars.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::aggregator::Measurement;

/// Required columns in the measurements CSV.
pub const SESSION_COL: &str = "session";
pub const DATE_COL: &str = "created_date";
pub const DISCOMFORT_COL: &str = "discomfort";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },
    #[error("Unparseable timestamp at row {row}: '{value}'")]
    InvalidTimestamp { row: usize, value: String },
    #[error("No data loaded")]
    NoData,
}

/// Default measurements file, relative to the working directory.
pub fn default_data_path() -> PathBuf {
    Path::new("data").join("iot_metrics.csv")
}

/// Parse a measurement timestamp; accepts datetime or bare date forms.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Handles measurement CSV loading with Polars.
pub struct MetricsLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for MetricsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a measurements CSV using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        self.file_path = Some(file_path.to_path_buf());

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        for name in [SESSION_COL, DATE_COL, DISCOMFORT_COL] {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Extract typed measurement rows from the loaded DataFrame.
    pub fn measurements(&self) -> Result<Vec<Measurement>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;

        let sessions = df.column(SESSION_COL)?.cast(&DataType::Int64)?;
        let sessions = sessions.i64()?;
        let dates = df.column(DATE_COL)?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let discomforts = df.column(DISCOMFORT_COL)?.cast(&DataType::Float64)?;
        let discomforts = discomforts.f64()?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let session = sessions.get(i).ok_or_else(|| LoaderError::NullValue {
                column: SESSION_COL.to_string(),
                row: i,
            })?;
            let raw_date = dates.get(i).ok_or_else(|| LoaderError::NullValue {
                column: DATE_COL.to_string(),
                row: i,
            })?;
            let created_date =
                parse_timestamp(raw_date).ok_or_else(|| LoaderError::InvalidTimestamp {
                    row: i,
                    value: raw_date.to_string(),
                })?;
            let discomfort = discomforts.get(i).ok_or_else(|| LoaderError::NullValue {
                column: DISCOMFORT_COL.to_string(),
                row: i,
            })?;

            rows.push(Measurement {
                session,
                created_date,
                discomfort,
            });
        }

        Ok(rows)
    }

    /// Get the number of rows in the DataFrame.
    pub fn row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get file path.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_with_and_without_fraction() {
        let dt = parse_timestamp("2024-01-01 10:30:00").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(parse_timestamp("2024-01-01 10:30:00.250").is_some());
        assert!(parse_timestamp("2024-01-01T10:30:00").is_some());
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_timestamp("2024-03-08").unwrap();
        assert_eq!(dt.time(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(parse_timestamp("08/03/2024").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
