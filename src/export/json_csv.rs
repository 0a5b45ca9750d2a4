// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::ExportTable;
use crate::export::notify_export_success;
use crate::export::report::table_to_csv_string;
use crate::ui::messages::info;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Export JSON pretty-printed: one object per row, keyed by header.
pub(crate) fn export_json(table: &ExportTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            let obj: Map<String, Value> = table
                .headers
                .iter()
                .zip(row)
                .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                .collect();
            Value::Object(obj)
        })
        .collect();

    let json_data = serde_json::to_string_pretty(&rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    fs::write(path, json_data)?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with header row.
pub(crate) fn export_csv(table: &ExportTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let data = table_to_csv_string(table)?;
    fs::write(path, data)?;

    notify_export_success("CSV", path);
    Ok(())
}
