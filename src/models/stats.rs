use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate counters over the attendee collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_attendees: usize,
    pub registered_attendees: usize,
    pub lunch_distributed: usize,
    pub kit_distributed: usize,
    /// Percentage in `0.0..=100.0`.
    pub registration_rate: f64,
    pub daily_attendance: BTreeMap<NaiveDate, usize>,
}

/// Extra report figures derived from the collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub stats: DashboardStats,
    pub no_show_rate: f64,
    /// Relative to registered attendees.
    pub lunch_collection_rate: f64,
    /// Relative to registered attendees.
    pub kit_collection_rate: f64,
    /// Hour of day (0-23) → check-ins.
    pub registrations_by_hour: BTreeMap<u32, usize>,
    /// Hour of day (0-23) → lunches handed out.
    pub lunch_by_hour: BTreeMap<u32, usize>,
    /// At most ten entries, most represented first.
    pub top_companies: Vec<(String, usize)>,
}
