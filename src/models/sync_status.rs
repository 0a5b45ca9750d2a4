use chrono::{DateTime, Local};
use serde::Serialize;

/// Ephemeral state of the simulated synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub syncing: bool,
    pub last_synced: Option<DateTime<Local>>,
    pub pending_changes: u32,
}
