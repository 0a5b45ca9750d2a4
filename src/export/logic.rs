// src/export/logic.rs

use crate::config::Config;
use crate::core::calculator::report::build_report_summary;
use crate::core::store::AttendeeStore;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ExportTable, attendee_list_table, report_table};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportKind, notify_export_success};
use crate::models::{ArchivedEvent, EventSettings};
use crate::ui::messages::warning;
use crate::utils::date::today;
use crate::utils::formatting::percent;
use crate::utils::path::slug_event_name;
use std::fs;
use std::path::{Path, PathBuf};

/// High level export entry points.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the live attendee collection.
    ///
    /// - `kind`: full report or re-importable attendee list
    /// - `file`: absolute output path; `None` → default name in the export dir
    ///
    /// Returns the path written.
    pub fn export(
        store: &AttendeeStore,
        kind: ExportKind,
        format: ExportFormat,
        file: Option<&str>,
        force: bool,
        cfg: &Config,
    ) -> AppResult<PathBuf> {
        let settings = store.settings();
        let path = resolve_output_path(file, &default_file_name(settings, kind, format), cfg)?;

        ensure_writable(&path, force)?;

        let attendees = store.attendees();
        if attendees.is_empty() {
            warning("No attendees to export; writing headers only.");
        }

        let table: ExportTable = match kind {
            ExportKind::Report => report_table(attendees, &cfg.date_format),
            ExportKind::Attendees => attendee_list_table(attendees),
        };

        match format {
            ExportFormat::Csv => export_csv(&table, &path)?,
            ExportFormat::Json => export_json(&table, &path)?,
            ExportFormat::Xlsx => export_xlsx(&table, &path, &settings.name)?,
            ExportFormat::Pdf => {
                let title = format!("{} - {}", settings.name, kind_title(kind));
                let subtitle = pdf_subtitle(store, kind);
                export_pdf(&table, &path, &title, &subtitle)?
            }
        }

        Ok(path)
    }

    /// Write the stored final report of an archived event.
    pub fn export_archived(
        event: &ArchivedEvent,
        file: Option<&str>,
        force: bool,
        cfg: &Config,
    ) -> AppResult<PathBuf> {
        let path = resolve_output_path(file, &event.report_file_name(), cfg)?;

        ensure_writable(&path, force)?;
        fs::write(&path, &event.csv_data)?;

        notify_export_success("Archived report", &path);
        Ok(path)
    }
}

/// `<Event_Name>_<kind>_<YYYY-MM-DD>.<ext>`, kind being `report` or `attendees`.
pub fn default_file_name(settings: &EventSettings, kind: ExportKind, format: ExportFormat) -> String {
    format!(
        "{}_{}_{}.{}",
        slug_event_name(&settings.name),
        kind.as_str(),
        today().format("%Y-%m-%d"),
        format.as_str()
    )
}

fn resolve_output_path(file: Option<&str>, default_name: &str, cfg: &Config) -> AppResult<PathBuf> {
    match file {
        Some(f) => {
            let p = Path::new(f);
            if !p.is_absolute() {
                return Err(AppError::Export(format!(
                    "Output file path must be absolute: {f}"
                )));
            }
            Ok(p.to_path_buf())
        }
        None => {
            let dir = cfg.export_dir_path()?;
            fs::create_dir_all(&dir)?;
            Ok(dir.join(default_name))
        }
    }
}

fn kind_title(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Report => "Attendance report",
        ExportKind::Attendees => "Attendee list",
    }
}

fn pdf_subtitle(store: &AttendeeStore, kind: ExportKind) -> String {
    let s = store.settings();
    let dates = if s.start_date == s.end_date {
        s.start_date.format("%Y-%m-%d").to_string()
    } else {
        format!("{} to {}", s.start_date.format("%Y-%m-%d"), s.end_date.format("%Y-%m-%d"))
    };

    match kind {
        ExportKind::Attendees => format!("{} | {} | {} attendees", s.venue, dates, store.attendees().len()),
        ExportKind::Report => {
            let r = build_report_summary(store.attendees());
            format!(
                "{} | {} | registered {}/{} ({}) | lunch {} | kits {}",
                s.venue,
                dates,
                r.stats.registered_attendees,
                r.stats.total_attendees,
                percent(r.stats.registration_rate),
                r.stats.lunch_distributed,
                r.stats.kit_distributed
            )
        }
    }
}
