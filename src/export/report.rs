// src/export/report.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{ExportTable, attendee_list_table, report_table};
use crate::models::Attendee;

/// Render a table as CSV text (header row included).
pub fn table_to_csv_string(table: &ExportTable) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

/// Full report as CSV text, as stored in archived events.
pub fn report_csv_string(attendees: &[Attendee], date_format: &str) -> AppResult<String> {
    table_to_csv_string(&report_table(attendees, date_format))
}

/// Re-importable attendee list as CSV text.
pub fn attendees_csv_string(attendees: &[Attendee]) -> AppResult<String> {
    table_to_csv_string(&attendee_list_table(attendees))
}
