use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendeeDraft, AttendeePatch};
use crate::ui::messages::{error, success, warning};

/// Handle `add` and `edit`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Add(args) => {
            if args.name.trim().is_empty() || args.email.trim().is_empty() {
                return Err(AppError::Other("name and email must not be empty".into()));
            }

            let mut draft = AttendeeDraft::new(args.name.trim(), args.email.trim());
            if let Some(p) = args.phone.as_deref().filter(|s| !s.trim().is_empty()) {
                draft = draft.with_phone(p.trim());
            }
            if let Some(c) = args.company.as_deref().filter(|s| !s.trim().is_empty()) {
                draft = draft.with_company(c.trim());
            }
            if let Some(u) = args.unique_id.as_deref().filter(|s| !s.trim().is_empty()) {
                draft = draft.with_unique_id(u.trim());
            }

            let mut session = Session::open(cli, cfg)?;
            let created = session.store.add_attendees(vec![draft])?;

            for a in &created {
                session.log("add", &a.unique_id, &format!("Added {} <{}>", a.name, a.email));
                success(format!("Added {} with id {}", a.name, a.unique_id));
                println!("   QR payload: {}", a.qr_code_data);
            }

            session.finish()?;
        }

        Commands::Edit {
            token,
            name,
            email,
            phone,
            company,
        } => {
            let patch = AttendeePatch {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                company: company.clone(),
                ..Default::default()
            };

            if patch.is_empty() {
                warning("Nothing to update: pass at least one of --name, --email, --phone, --company.");
                return Ok(());
            }

            let mut session = Session::open(cli, cfg)?;

            let Some(id) = session.store.find_by_any(token).map(|a| a.id.clone()) else {
                error(format!("No attendee matches '{token}'."));
                return Ok(());
            };

            if session.store.update_attendee(&id, patch)? {
                let unique_id = session
                    .store
                    .get_attendee_by_id(&id)
                    .map(|a| a.unique_id.clone())
                    .unwrap_or_default();
                session.log("edit", &unique_id, "Contact details updated");
                success(format!("Attendee {unique_id} updated."));
            }

            session.finish()?;
        }

        _ => {}
    }

    Ok(())
}
