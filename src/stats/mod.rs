//! Stats module - trend metrics over aggregated measurements

mod trend;

pub use trend::{compute_trend, TrendError, TrendSnapshot, MIN_TREND_POINTS};
