//! Measurement Aggregation Module
//! Groups raw measurements by (session, date) and derives progress values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Upper bound of the discomfort scale; progress bars normalize against it.
pub const DISCOMFORT_SCALE_MAX: f64 = 5.0;

/// Raw measurement row as read from the CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub session: i64,
    pub created_date: NaiveDateTime,
    pub discomfort: f64,
}

/// Mean discomfort for one (session, date) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPoint {
    pub session: i64,
    pub date: NaiveDate,
    pub discomfort: f64,
    pub progress: f32,
}

/// Raw measurement matching a searched date, with display fields attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredRow {
    pub session: i64,
    pub created_date: NaiveDateTime,
    pub date_label: String,
    pub discomfort: f64,
    pub progress: f32,
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Display form used in tables and exports.
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Group measurements by (session, day) and compute the mean discomfort per
/// group. Output is sorted ascending by session, then by date.
pub fn aggregate(rows: &[Measurement]) -> Vec<AggregatedPoint> {
    let mut groups: BTreeMap<(i64, NaiveDate), Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.session, row.created_date.date()))
            .or_default()
            .push(row.discomfort);
    }

    groups
        .into_iter()
        .map(|((session, date), values)| {
            let mean = values.iter().mean();
            AggregatedPoint {
                session,
                date,
                discomfort: mean,
                progress: round2(mean) as f32,
            }
        })
        .collect()
}

/// Select measurements whose day-truncated timestamp equals `target`,
/// preserving the original row order. An empty result means "no data for
/// this date" and is not an error.
pub fn filter_by_date(rows: &[Measurement], target: NaiveDate) -> Vec<FilteredRow> {
    rows.iter()
        .filter(|row| row.created_date.date() == target)
        .map(|row| FilteredRow {
            session: row.session,
            created_date: row.created_date,
            date_label: format_date_label(row.created_date.date()),
            discomfort: row.discomfort,
            progress: round2(row.discomfort) as f32,
        })
        .collect()
}

/// Mean of the per-row progress values; `None` when nothing matched.
pub fn mean_progress(rows: &[FilteredRow]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|r| r.progress as f64).mean())
}
