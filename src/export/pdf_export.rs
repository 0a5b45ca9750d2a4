// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::ExportTable;
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

/// Export the table as a paginated PDF.
pub(crate) fn export_pdf(table: &ExportTable, path: &Path, title: &str, subtitle: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = table.header_refs();

    let mut pdf = PdfManager::new();
    pdf.write_table(title, subtitle, &headers, &table.rows);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
