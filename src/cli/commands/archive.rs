use crate::cli::commands::end_event::short_id;
use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::ExportLogic;
use crate::models::ArchivedEvent;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, RESET};
use crate::utils::percent;
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Archive {
        list,
        show,
        export,
        file,
        force,
    } = &cli.command
    {
        let session = Session::open(cli, cfg)?;
        let store = &session.store;

        let nothing_selected = !*list && show.is_none() && export.is_none();

        if *list || nothing_selected {
            print_list(store.archived_events(), &cfg.date_format);
        }

        if let Some(id) = show {
            let event = store
                .get_archived_event(id)
                .ok_or_else(|| AppError::ArchiveNotFound(id.clone()))?;
            print_detail(event, &cfg.date_format);
        }

        if let Some(id) = export {
            let event = store
                .get_archived_event(id)
                .ok_or_else(|| AppError::ArchiveNotFound(id.clone()))?;
            let path = ExportLogic::export_archived(event, file.as_deref(), *force, cfg)?;
            session.log(
                "archive_export",
                &event.id,
                &format!("Final report written to {}", path.display()),
            );
        }
    }

    Ok(())
}

fn print_list(events: &[ArchivedEvent], date_format: &str) {
    if events.is_empty() {
        info("No archived events.");
        return;
    }

    let rows = events
        .iter()
        .map(|e| {
            vec![
                short_id(&e.id).to_string(),
                e.settings.name.clone(),
                e.end_date.format(date_format).to_string(),
                e.stats.total_attendees.to_string(),
                percent(e.stats.registration_rate),
            ]
        })
        .collect();

    let table = Table::fitted(&["ID", "Event", "Ended", "Attendees", "Checked in"], rows);
    println!("{}", table.render());
}

fn print_detail(e: &ArchivedEvent, date_format: &str) {
    let s = &e.settings;
    let field = |label: &str, value: String| {
        println!("{CYAN}{:<16}{RESET} {}", label, value);
    };

    println!();
    field("ID", e.id.clone());
    field("Event", s.name.clone());
    field("Venue", s.venue.clone());
    field(
        "Dates",
        format!("{} .. {}", s.start_date.format("%Y-%m-%d"), s.end_date.format("%Y-%m-%d")),
    );
    field("Ended", e.end_date.format(date_format).to_string());
    field("Attendees", e.stats.total_attendees.to_string());
    field(
        "Checked in",
        format!("{} ({})", e.stats.registered_attendees, percent(e.stats.registration_rate)),
    );
    field("Lunch", e.stats.lunch_distributed.to_string());
    field("Kits", e.stats.kit_distributed.to_string());
    field("Report file", e.report_file_name());
    println!();
}
