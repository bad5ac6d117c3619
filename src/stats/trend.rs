//! Trend Metrics Module
//! Derives deltas and improvement percentages from the most recent
//! aggregated points.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::data::AggregatedPoint;

/// Number of aggregated points the trend computation needs.
pub const MIN_TREND_POINTS: usize = 3;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("Not enough aggregated points for a trend: got {got}, need at least 3")]
    InsufficientData { got: usize },
}

/// Snapshot of the three most recent aggregated points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSnapshot {
    pub current: f64,
    pub delta_vs_previous: f64,
    pub delta_vs_prior_pair: f64,
    pub pct_improvement_current: f64,
    pub pct_improvement_previous: f64,
    pub session_count: i64,
    pub last_date: NaiveDate,
}

/// Percentage change of `delta` against a baseline mean. A baseline of
/// exactly zero yields NaN; views render NaN percentages as missing.
fn pct_improvement(delta: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        f64::NAN
    } else {
        (delta / baseline) * 100.0
    }
}

/// Compute the trend snapshot from points sorted by (session, date).
/// Only the three most recent points participate.
pub fn compute_trend(points: &[AggregatedPoint]) -> Result<TrendSnapshot, TrendError> {
    if points.len() < MIN_TREND_POINTS {
        return Err(TrendError::InsufficientData { got: points.len() });
    }

    let last = &points[points.len() - 1];
    let prev = &points[points.len() - 2];
    let prior = &points[points.len() - 3];

    let delta_vs_previous = last.discomfort - prev.discomfort;
    let delta_vs_prior_pair = prev.discomfort - prior.discomfort;

    Ok(TrendSnapshot {
        current: last.discomfort,
        delta_vs_previous,
        delta_vs_prior_pair,
        pct_improvement_current: pct_improvement(delta_vs_previous, prev.discomfort),
        pct_improvement_previous: pct_improvement(delta_vs_prior_pair, prior.discomfort),
        session_count: last.session,
        last_date: last.date,
    })
}
