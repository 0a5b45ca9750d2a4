use crate::cli::parser::{Cli, Commands, SettingsArgs};
use crate::cli::session::Session;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{EventSettings, SettingsPatch};
use crate::ui::messages::success;
use crate::utils::colors::{CYAN, RESET, colorize_optional};
use crate::utils::date::parse_date;
use chrono::NaiveDate;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings(args) = &cli.command {
        let patch = build_patch(args)?;

        let mut session = Session::open(cli, cfg)?;

        if patch.is_empty() {
            print_settings(session.store.settings());
            return Ok(());
        }

        let updated = session.store.update_event_settings(patch)?.clone();
        session.log("settings", &updated.name, "Event settings updated");
        success("Event settings updated.");
        print_settings(&updated);

        session.finish()?;
    }

    Ok(())
}

fn date_arg(value: &Option<String>) -> AppResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.clone())),
    }
}

/// Translate command-line flags into a settings patch.
pub(crate) fn build_patch(args: &SettingsArgs) -> AppResult<SettingsPatch> {
    if let Some(name) = &args.name
        && name.trim().is_empty()
    {
        return Err(AppError::InvalidSettings("event name cannot be empty".into()));
    }

    let is_multi_day = match (args.multi_day, args.single_day) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    };

    Ok(SettingsPatch {
        name: args.name.as_ref().map(|s| s.trim().to_string()),
        start_date: date_arg(&args.start)?,
        end_date: date_arg(&args.end)?,
        is_multi_day,
        venue: args.venue.clone(),
        organizer_name: args.organizer_name.clone(),
        organizer_email: args.organizer_email.clone(),
        organizer_phone: args.organizer_phone.clone(),
    })
}

fn print_settings(s: &EventSettings) {
    let field = |label: &str, value: &str| {
        println!("{CYAN}{:<16}{RESET} {}", label, colorize_optional(value));
    };

    let days: Vec<String> = s.days.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();

    println!();
    field("Event", &s.name);
    field("Venue", &s.venue);
    field("Start date", &s.start_date.format("%Y-%m-%d").to_string());
    field("End date", &s.end_date.format("%Y-%m-%d").to_string());
    field("Multi-day", if s.is_multi_day { "yes" } else { "no" });
    field("Days", &days.join(", "));
    field("Organizer", &s.organizer_name);
    field("Organizer email", &s.organizer_email);
    field("Organizer phone", &s.organizer_phone);
    println!();
}
