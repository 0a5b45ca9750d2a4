pub mod archived_event;
pub mod attendee;
pub mod event_settings;
pub mod stats;
pub mod sync_status;

pub use archived_event::ArchivedEvent;
pub use attendee::{Attendee, AttendeeDraft, AttendeePatch};
pub use event_settings::{EventSettings, SettingsPatch};
pub use stats::{DashboardStats, ReportSummary};
pub use sync_status::SyncStatus;
