use super::stats::{calculate_stats, rate};
use crate::models::{Attendee, ReportSummary};
use chrono::{DateTime, Local, Timelike};
use std::collections::{BTreeMap, HashMap};

const TOP_COMPANIES: usize = 10;

fn by_hour<'a, I>(times: I) -> BTreeMap<u32, usize>
where
    I: Iterator<Item = &'a DateTime<Local>>,
{
    let mut out = BTreeMap::new();
    for t in times {
        *out.entry(t.hour()).or_default() += 1;
    }
    out
}

/// Companies ranked by attendee count, ties broken by name.
fn top_companies(attendees: &[Attendee]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for a in attendees {
        *counts.entry(a.display_company()).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_COMPANIES);
    ranked
}

/// Dashboard counters plus the report figures.
pub fn build_report_summary(attendees: &[Attendee]) -> ReportSummary {
    let stats = calculate_stats(attendees);
    let no_show = stats.total_attendees - stats.registered_attendees;

    ReportSummary {
        no_show_rate: rate(no_show, stats.total_attendees),
        lunch_collection_rate: rate(stats.lunch_distributed, stats.registered_attendees),
        kit_collection_rate: rate(stats.kit_distributed, stats.registered_attendees),
        registrations_by_hour: by_hour(
            attendees.iter().filter_map(|a| a.registration_time.as_ref()),
        ),
        lunch_by_hour: by_hour(
            attendees
                .iter()
                .filter_map(|a| a.lunch_collection_time.as_ref()),
        ),
        top_companies: top_companies(attendees),
        stats,
    }
}
