use crate::utils::date::{days_between, today};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Configuration of the live event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSettings {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_multi_day: bool,
    pub days: Vec<NaiveDate>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub organizer_name: String,
    #[serde(default)]
    pub organizer_email: String,
    #[serde(default)]
    pub organizer_phone: String,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self::with_defaults(
            &crate::config::default_event_name(),
            &crate::config::default_venue(),
        )
    }
}

impl EventSettings {
    /// Single-day event starting today.
    pub fn with_defaults(name: &str, venue: &str) -> Self {
        let d = today();
        Self {
            name: name.to_string(),
            start_date: d,
            end_date: d,
            is_multi_day: false,
            days: vec![d],
            venue: venue.to_string(),
            organizer_name: String::new(),
            organizer_email: String::new(),
            organizer_phone: String::new(),
        }
    }
}

/// Partial update of [`EventSettings`].
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_multi_day: Option<bool>,
    pub venue: Option<String>,
    pub organizer_name: Option<String>,
    pub organizer_email: Option<String>,
    pub organizer_phone: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.is_multi_day.is_none()
            && self.venue.is_none()
            && self.organizer_name.is_none()
            && self.organizer_email.is_none()
            && self.organizer_phone.is_none()
    }

    /// Merge into `s`. When the patch touches `is_multi_day` or either date,
    /// `days` is rebuilt from the merged start/end dates.
    pub(crate) fn apply_to(self, s: &mut EventSettings) {
        let reshape =
            self.is_multi_day.is_some() || self.start_date.is_some() || self.end_date.is_some();

        if let Some(v) = self.name {
            s.name = v;
        }
        if let Some(v) = self.start_date {
            s.start_date = v;
        }
        if let Some(v) = self.end_date {
            s.end_date = v;
        }
        if let Some(v) = self.venue {
            s.venue = v;
        }
        if let Some(v) = self.organizer_name {
            s.organizer_name = v;
        }
        if let Some(v) = self.organizer_email {
            s.organizer_email = v;
        }
        if let Some(v) = self.organizer_phone {
            s.organizer_phone = v;
        }

        if let Some(v) = self.is_multi_day {
            s.is_multi_day = v;
        }
        if !reshape {
            return;
        }

        s.days = if s.is_multi_day {
            days_between(s.start_date, s.end_date)
        } else {
            vec![s.start_date]
        };
    }
}
