use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use crate::utils::date::format_opt_timestamp;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if matches!(cli.command, Commands::Status) {
        let session = Session::open(cli, cfg)?;
        let sync = session.store.sync().borrow();
        let status = sync.status();

        let online = if sync.is_online() {
            format!("{GREEN}online{RESET}")
        } else {
            format!("{RED}offline{RESET}")
        };
        let state = if status.syncing { "syncing" } else { "idle" };

        println!("{CYAN}Connection:{RESET}      {online}");
        println!("{CYAN}Sync:{RESET}            {state}");
        println!(
            "{CYAN}Pending changes:{RESET} {YELLOW}{}{RESET}",
            status.pending_changes
        );
        println!(
            "{CYAN}Last synced:{RESET}     {}",
            format_opt_timestamp(status.last_synced.as_ref(), &cfg.date_format)
        );
        println!(
            "{CYAN}Event:{RESET}           {} ({} attendee(s), {} archived)",
            session.store.settings().name,
            session.store.attendees().len(),
            session.store.archived_events().len()
        );
    }

    Ok(())
}
