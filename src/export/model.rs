// src/export/model.rs

use crate::models::Attendee;
use crate::utils::date::format_opt_timestamp;
use crate::utils::formatting::describe_flag;
use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeSet;

/// Rectangular export data shared by every output format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn header_refs(&self) -> Vec<&str> {
        self.headers.iter().map(String::as_str).collect()
    }
}

const REPORT_HEADERS: [&str; 11] = [
    "Name",
    "Email",
    "Phone",
    "Company",
    "UniqueID",
    "CheckedIn",
    "CheckInTime",
    "LunchCollected",
    "LunchCollectionTime",
    "KitCollected",
    "KitCollectionTime",
];

const LIST_HEADERS: [&str; 4] = ["name", "email", "phone", "company"];

/// Every day present in any attendance map, ascending.
fn all_days(attendees: &[Attendee]) -> BTreeSet<NaiveDate> {
    attendees
        .iter()
        .flat_map(|a| a.attendance.keys().copied())
        .collect()
}

/// Every extra attribute name, ascending.
fn all_extra_keys(attendees: &[Attendee]) -> BTreeSet<String> {
    attendees
        .iter()
        .flat_map(|a| a.extra.keys().cloned())
        .collect()
}

/// Timestamp cell; empty when the status was never reached.
fn ts_cell(t: Option<&DateTime<Local>>, date_format: &str) -> String {
    match t {
        Some(_) => format_opt_timestamp(t, date_format),
        None => String::new(),
    }
}

/// Full report: status columns, one `Attendance_<date>` column per tracked
/// day (`Present`/`Absent`), then extra attributes.
pub fn report_table(attendees: &[Attendee], date_format: &str) -> ExportTable {
    let days = all_days(attendees);
    let extras = all_extra_keys(attendees);

    let mut headers: Vec<String> = REPORT_HEADERS.iter().map(|h| h.to_string()).collect();
    headers.extend(days.iter().map(|d| format!("Attendance_{}", d.format("%Y-%m-%d"))));
    headers.extend(extras.iter().cloned());

    let rows = attendees
        .iter()
        .map(|a| {
            let mut row = vec![
                a.name.clone(),
                a.email.clone(),
                a.phone.clone().unwrap_or_default(),
                a.company.clone().unwrap_or_default(),
                a.unique_id.clone(),
                describe_flag(a.is_registered).to_string(),
                ts_cell(a.registration_time.as_ref(), date_format),
                describe_flag(a.has_collected_lunch).to_string(),
                ts_cell(a.lunch_collection_time.as_ref(), date_format),
                describe_flag(a.has_collected_kit).to_string(),
                ts_cell(a.kit_collection_time.as_ref(), date_format),
            ];
            for d in &days {
                let present = a.attendance.get(d).copied().unwrap_or(false);
                row.push(if present { "Present" } else { "Absent" }.to_string());
            }
            for k in &extras {
                row.push(a.extra.get(k).cloned().unwrap_or_default());
            }
            row
        })
        .collect();

    ExportTable { headers, rows }
}

/// Simplified list in the import layout: contact fields plus extras.
pub fn attendee_list_table(attendees: &[Attendee]) -> ExportTable {
    let extras = all_extra_keys(attendees);

    let mut headers: Vec<String> = LIST_HEADERS.iter().map(|h| h.to_string()).collect();
    headers.extend(extras.iter().cloned());

    let rows = attendees
        .iter()
        .map(|a| {
            let mut row = vec![
                a.name.clone(),
                a.email.clone(),
                a.phone.clone().unwrap_or_default(),
                a.company.clone().unwrap_or_default(),
            ];
            for k in &extras {
                row.push(a.extra.get(k).cloned().unwrap_or_default());
            }
            row
        })
        .collect();

    ExportTable { headers, rows }
}
