use crate::models::{Attendee, DashboardStats};
use std::collections::BTreeMap;

/// Part of `whole` as a percentage; 0 when `whole` is 0.
pub fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Pure aggregation over the attendee collection.
///
/// Every day present in any attendance map is reported, with 0 when nobody
/// attended it.
pub fn calculate_stats(attendees: &[Attendee]) -> DashboardStats {
    let total = attendees.len();
    let registered = attendees.iter().filter(|a| a.is_registered).count();
    let lunch = attendees.iter().filter(|a| a.has_collected_lunch).count();
    let kit = attendees.iter().filter(|a| a.has_collected_kit).count();

    let mut daily: BTreeMap<_, usize> = BTreeMap::new();
    for a in attendees {
        for (day, attended) in &a.attendance {
            let slot = daily.entry(*day).or_default();
            if *attended {
                *slot += 1;
            }
        }
    }

    DashboardStats {
        total_attendees: total,
        registered_attendees: registered,
        lunch_distributed: lunch,
        kit_distributed: kit,
        registration_rate: rate(registered, total),
        daily_attendance: daily,
    }
}
