use super::{event_settings::EventSettings, stats::DashboardStats};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Frozen snapshot of a concluded event. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedEvent {
    pub id: String,
    pub settings: EventSettings,
    pub stats: DashboardStats,
    /// When the event was ended.
    pub end_date: DateTime<Local>,
    /// Final report in CSV form.
    pub csv_data: String,
}

impl ArchivedEvent {
    pub fn report_file_name(&self) -> String {
        format!(
            "{}_final_report.csv",
            crate::utils::path::slug_event_name(&self.settings.name)
        )
    }
}
