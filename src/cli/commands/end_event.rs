use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success, warning};
use crate::utils::percent;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::EndEvent { yes } = &cli.command {
        let mut session = Session::open(cli, cfg)?;

        let name = session.store.settings().name.clone();
        let count = session.store.attendees().len();

        if !*yes {
            warning(format!(
                "Ending '{name}' archives its report and removes all {count} attendee(s). This cannot be undone."
            ));
            if !confirm("End the event?")? {
                info("Cancelled; nothing changed.");
                return Ok(());
            }
        }

        let archived = session.store.end_event()?;

        session.log(
            "end_event",
            &archived.id,
            &format!("Archived '{}' with {} attendee(s)", name, archived.stats.total_attendees),
        );

        success(format!(
            "Event '{}' archived: {} attendee(s), {} checked in ({}).",
            name,
            archived.stats.total_attendees,
            archived.stats.registered_attendees,
            percent(archived.stats.registration_rate)
        ));
        info(format!(
            "Archive id {}. Use `rcheckin archive --export {}` for the final report.",
            archived.id,
            short_id(&archived.id)
        ));

        session.finish()?;
    }

    Ok(())
}

/// First block of a UUID, enough to select an archive.
pub(crate) fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
