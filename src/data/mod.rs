//! Data module - CSV loading, aggregation and date filtering

mod aggregator;
mod loader;

pub use aggregator::{
    aggregate, filter_by_date, format_date_label, mean_progress, AggregatedPoint, FilteredRow,
    Measurement, DISCOMFORT_SCALE_MAX,
};
pub use loader::{default_data_path, parse_timestamp, LoaderError, MetricsLoader};
