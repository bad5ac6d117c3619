//! Export Formatter Module
//! Relabels selected columns and serializes filtered rows to CSV bytes.

use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;

use crate::data::FilteredRow;

/// Internal field names and their display labels, in export order.
/// `progress` is always exported last and is not part of the selectable set.
pub const EXPORT_FIELDS: [(&str, &str); 2] = [
    ("session", "Sessão"),
    ("created_date_formatted", "Data"),
];

/// Display label of the always-included progress column.
pub const PROGRESS_LABEL: &str = "Progresso";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Download file name for a given appointment date.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("metricas_{}.csv", date.format("%d%m%Y"))
}

/// Serialize `rows` to UTF-8 CSV bytes with a header row and no index
/// column. `selected_labels` picks which of the optional columns appear,
/// matched by display label; unknown labels are ignored. Columns are
/// emitted in the fixed `EXPORT_FIELDS` order with `Progresso` last, so
/// equal selections always produce byte-identical output.
pub fn format_export(
    rows: &[FilteredRow],
    selected_labels: &[String],
) -> Result<Vec<u8>, ExportError> {
    let mut columns: Vec<Column> = Vec::new();

    for (field, label) in EXPORT_FIELDS {
        if !selected_labels.iter().any(|l| l == label) {
            continue;
        }
        let column = match field {
            "session" => Column::new(
                label.into(),
                rows.iter().map(|r| r.session).collect::<Vec<i64>>(),
            ),
            _ => Column::new(
                label.into(),
                rows.iter().map(|r| r.date_label.clone()).collect::<Vec<String>>(),
            ),
        };
        columns.push(column);
    }

    columns.push(Column::new(
        PROGRESS_LABEL.into(),
        rows.iter().map(|r| r.progress).collect::<Vec<f32>>(),
    ));

    let mut df = DataFrame::new(columns)?;

    let mut buf = Vec::new();
    CsvWriter::new(&mut buf).include_header(true).finish(&mut df)?;
    Ok(buf)
}
