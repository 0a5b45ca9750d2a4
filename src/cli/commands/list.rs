use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Attendee;
use crate::ui::messages::{error, info};
use crate::utils::colors::{CYAN, RESET, color_for_optional_field, colorize_flag, colorize_optional};
use crate::utils::date::format_opt_timestamp;
use crate::utils::describe_flag;
use crate::utils::formatting::truncate;
use crate::utils::table::Table;

/// Handle `list` and `show`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::List { search } => {
            let session = Session::open(cli, cfg)?;
            let found = session.store.search_attendees(search.as_deref().unwrap_or(""));

            if found.is_empty() {
                match search {
                    Some(q) if !q.trim().is_empty() => info(format!("No attendees match '{q}'.")),
                    _ => info("No attendees yet. Use `rcheckin import` or `rcheckin add`."),
                }
                return Ok(());
            }

            print_list(&found);
            println!("{} attendee(s)", found.len());
        }

        Commands::Show { token } => {
            let session = Session::open(cli, cfg)?;
            match session.store.find_by_any(token) {
                Some(a) => print_detail(a, &cfg.date_format),
                None => error(format!("No attendee matches '{token}'.")),
            }
        }

        _ => {}
    }

    Ok(())
}

fn print_list(attendees: &[&Attendee]) {
    let rows = attendees
        .iter()
        .map(|a| {
            vec![
                a.unique_id.clone(),
                truncate(&a.name, 28),
                truncate(&a.email, 32),
                truncate(a.display_company(), 24),
                describe_flag(a.is_registered).to_string(),
                describe_flag(a.has_collected_lunch).to_string(),
                describe_flag(a.has_collected_kit).to_string(),
            ]
        })
        .collect();

    let table = Table::fitted(
        &["Unique ID", "Name", "Email", "Company", "Checked in", "Lunch", "Kit"],
        rows,
    );
    println!("{}", table.render());
}

fn print_detail(a: &Attendee, date_format: &str) {
    let field = |label: &str, value: &str| {
        println!("{CYAN}{:<14}{RESET} {}", label, colorize_optional(value));
    };

    println!();
    field("Name", &a.name);
    field("Email", &a.email);
    field("Phone", a.phone.as_deref().unwrap_or("--"));
    println!(
        "{CYAN}{:<14}{RESET} {}{}{RESET}",
        "Company",
        color_for_optional_field(a.company.as_deref()),
        a.display_company()
    );
    field("Unique ID", &a.unique_id);
    field("QR payload", &a.qr_code_data);
    field("Record ID", &a.id);
    println!();

    let status = |label: &str, done: bool, at: Option<&chrono::DateTime<chrono::Local>>| {
        println!(
            "{CYAN}{:<14}{RESET} {:<4} {}",
            label,
            colorize_flag(done),
            colorize_optional(&format_opt_timestamp(at, date_format))
        );
    };
    status("Checked in", a.is_registered, a.registration_time.as_ref());
    status("Lunch", a.has_collected_lunch, a.lunch_collection_time.as_ref());
    status("Kit", a.has_collected_kit, a.kit_collection_time.as_ref());

    if !a.attendance.is_empty() {
        println!();
        for (day, present) in &a.attendance {
            println!("{CYAN}{:<14}{RESET} {}", day.format("%Y-%m-%d"), colorize_flag(*present));
        }
    }

    if !a.extra.is_empty() {
        println!();
        for (k, v) in &a.extra {
            field(k, v);
        }
    }
    println!();
}
