use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::calculator::report::build_report_summary;
use crate::core::calculator::stats::calculate_stats;
use crate::errors::AppResult;
use crate::models::{DashboardStats, ReportSummary};
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::percent;
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { report } = &cli.command {
        let session = Session::open(cli, cfg)?;
        let attendees = session.store.attendees();

        header(format!("{} - dashboard", session.store.settings().name));

        if *report {
            let summary = build_report_summary(attendees);
            print_stats(&summary.stats);
            print_report(&summary);
        } else {
            print_stats(&calculate_stats(attendees));
        }
    }

    Ok(())
}

fn print_stats(s: &DashboardStats) {
    println!("{CYAN}Total attendees:{RESET}   {GREEN}{}{RESET}", s.total_attendees);
    println!(
        "{CYAN}Checked in:{RESET}        {GREEN}{}{RESET} ({})",
        s.registered_attendees,
        percent(s.registration_rate)
    );
    println!("{CYAN}Lunch handed out:{RESET}  {GREEN}{}{RESET}", s.lunch_distributed);
    println!("{CYAN}Kits handed out:{RESET}   {GREEN}{}{RESET}", s.kit_distributed);

    if !s.daily_attendance.is_empty() {
        println!();
        let rows = s
            .daily_attendance
            .iter()
            .map(|(d, n)| vec![d.format("%Y-%m-%d").to_string(), n.to_string()])
            .collect();
        println!("{}", Table::fitted(&["Day", "Present"], rows).render());
    }
}

fn print_report(r: &ReportSummary) {
    println!();
    println!("{CYAN}No-show rate:{RESET}      {YELLOW}{}{RESET}", percent(r.no_show_rate));
    println!(
        "{CYAN}Lunch collection:{RESET}  {}",
        percent(r.lunch_collection_rate)
    );
    println!("{CYAN}Kit collection:{RESET}    {}", percent(r.kit_collection_rate));

    if !r.registrations_by_hour.is_empty() || !r.lunch_by_hour.is_empty() {
        println!();
        let hours: std::collections::BTreeSet<u32> = r
            .registrations_by_hour
            .keys()
            .chain(r.lunch_by_hour.keys())
            .copied()
            .collect();
        let rows = hours
            .iter()
            .map(|h| {
                vec![
                    format!("{h:02}:00"),
                    r.registrations_by_hour.get(h).copied().unwrap_or(0).to_string(),
                    r.lunch_by_hour.get(h).copied().unwrap_or(0).to_string(),
                ]
            })
            .collect();
        println!("{}", Table::fitted(&["Hour", "Check-ins", "Lunches"], rows).render());
    }

    if !r.top_companies.is_empty() {
        let rows = r
            .top_companies
            .iter()
            .map(|(c, n)| vec![c.clone(), n.to_string()])
            .collect();
        println!("{}", Table::fitted(&["Company", "Attendees"], rows).render());
    }
}
