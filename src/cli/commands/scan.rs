use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::store::{ScanAction, ScanOutcome};
use crate::errors::AppResult;
use crate::models::Attendee;
use crate::ui::messages::{error, success, warning};
use crate::utils::date::format_opt_timestamp;

/// Handle `checkin`, `lunch` and `kit`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let (token, action, allow_unregistered) = match &cli.command {
        Commands::Checkin { token } => (token, ScanAction::CheckIn, true),
        Commands::Lunch(args) => (&args.token, ScanAction::Lunch, args.allow_unregistered),
        Commands::Kit(args) => (&args.token, ScanAction::Kit, args.allow_unregistered),
        _ => return Ok(()),
    };
    let token = token.trim();

    let mut session = Session::open(cli, cfg)?;

    if !allow_unregistered
        && let Some(a) = session
            .store
            .get_attendee_by_unique_id(token)
            .or_else(|| session.store.get_attendee_by_qr_code(token))
        && !a.is_registered
    {
        warning(format!(
            "{} has not checked in yet. Check in first or pass --allow-unregistered.",
            a.name
        ));
        return Ok(());
    }

    match session.store.scan(token, action)? {
        ScanOutcome::NotFound => {
            error(format!("No attendee found with ID or QR code '{token}'."));
        }
        ScanOutcome::AlreadyDone(a) => {
            warning(already_done_message(&a, action, &cfg.date_format));
        }
        ScanOutcome::Updated(a) => {
            let msg = done_message(&a, action);
            session.log(action.label(), &a.unique_id, &msg);
            success(msg);
        }
    }

    session.finish()
}

fn done_message(a: &Attendee, action: ScanAction) -> String {
    match action {
        ScanAction::CheckIn => format!("{} checked in successfully.", a.name),
        ScanAction::Lunch => format!("Lunch handed out to {}.", a.name),
        ScanAction::Kit => format!("Kit handed out to {}.", a.name),
    }
}

fn already_done_message(a: &Attendee, action: ScanAction, date_format: &str) -> String {
    match action {
        ScanAction::CheckIn => format!(
            "{} is already checked in (at {}).",
            a.name,
            format_opt_timestamp(a.registration_time.as_ref(), date_format)
        ),
        ScanAction::Lunch => format!(
            "{} has already collected lunch (at {}).",
            a.name,
            format_opt_timestamp(a.lunch_collection_time.as_ref(), date_format)
        ),
        ScanAction::Kit => format!(
            "{} has already collected the kit (at {}).",
            a.name,
            format_opt_timestamp(a.kit_collection_time.as_ref(), date_format)
        ),
    }
}
