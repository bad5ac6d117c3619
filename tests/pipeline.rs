use chrono::NaiveDate;
use clinidash::data::{aggregate, filter_by_date, mean_progress, LoaderError, MetricsLoader};
use clinidash::export::{export_file_name, format_export};
use clinidash::stats::compute_trend;
use std::io::Write;

const SAMPLE_CSV: &str = "session,created_date,discomfort\n\
1,2024-01-01 09:00:00,3.0\n\
1,2024-01-01 10:30:00,5.0\n\
2,2024-01-02 09:15:00,2.0\n\
3,2024-01-03 11:00:00,1.0\n";

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn csv_to_trend_snapshot() {
    let file = write_csv(SAMPLE_CSV);
    let mut loader = MetricsLoader::new();
    loader.load_csv(file.path()).unwrap();
    assert_eq!(loader.row_count(), 4);

    let measurements = loader.measurements().unwrap();
    assert_eq!(measurements.len(), 4);

    let points = aggregate(&measurements);
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].session, 1);
    assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert!((points[0].discomfort - 4.0).abs() < 1e-9);
    assert!((points[1].discomfort - 2.0).abs() < 1e-9);
    assert!((points[2].discomfort - 1.0).abs() < 1e-9);

    let snapshot = compute_trend(&points).unwrap();
    assert!((snapshot.delta_vs_previous + 1.0).abs() < 1e-9);
    assert!((snapshot.pct_improvement_current + 50.0).abs() < 1e-9);
    assert_eq!(snapshot.session_count, 3);
    assert_eq!(
        snapshot.last_date,
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    );
}

#[test]
fn csv_to_filtered_export() {
    let file = write_csv(SAMPLE_CSV);
    let mut loader = MetricsLoader::new();
    loader.load_csv(file.path()).unwrap();
    let measurements = loader.measurements().unwrap();

    let target = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let filtered = filter_by_date(&measurements, target);
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].date_label, "01/01/2024");

    let mean = mean_progress(&filtered).unwrap();
    assert!((mean - 4.0).abs() < 1e-9);

    let selection = vec!["Sessão".to_string(), "Data".to_string()];
    let bytes = format_export(&filtered, &selection).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Sessão,Data,Progresso");
    assert_eq!(lines.len(), 3);

    assert_eq!(export_file_name(target), "metricas_01012024.csv");
}

#[test]
fn filtering_a_date_without_rows_is_empty() {
    let file = write_csv(SAMPLE_CSV);
    let mut loader = MetricsLoader::new();
    loader.load_csv(file.path()).unwrap();
    let measurements = loader.measurements().unwrap();

    let target = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let filtered = filter_by_date(&measurements, target);
    assert!(filtered.is_empty());
    assert!(mean_progress(&filtered).is_none());
}

#[test]
fn missing_column_is_a_loader_error() {
    let file = write_csv("session,discomfort\n1,3.0\n");
    let mut loader = MetricsLoader::new();
    match loader.load_csv(file.path()) {
        Err(LoaderError::MissingColumn(column)) => assert_eq!(column, "created_date"),
        other => panic!("expected MissingColumn, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn unparseable_timestamp_is_a_loader_error() {
    let file = write_csv("session,created_date,discomfort\n1,01-2024-99,3.0\n");
    let mut loader = MetricsLoader::new();
    loader.load_csv(file.path()).unwrap();
    match loader.measurements() {
        Err(LoaderError::InvalidTimestamp { row, value }) => {
            assert_eq!(row, 0);
            assert_eq!(value, "01-2024-99");
        }
        other => panic!("expected InvalidTimestamp, got {:?}", other),
    }
}
