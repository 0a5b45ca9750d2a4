use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names owned by [`Attendee`]; imported extra columns with one of
/// these names (case-insensitive) are dropped instead of shadowing them.
pub const CORE_FIELDS: &[&str] = &[
    "id",
    "uniqueId",
    "qrCodeData",
    "name",
    "email",
    "phone",
    "company",
    "isRegistered",
    "registrationTime",
    "hasCollectedLunch",
    "lunchCollectionTime",
    "hasCollectedKit",
    "kitCollectionTime",
    "attendance",
];

pub fn is_core_field(key: &str) -> bool {
    CORE_FIELDS.iter().any(|f| f.eq_ignore_ascii_case(key))
}

/// One registrant record, persisted as a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub unique_id: String,
    pub qr_code_data: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default)]
    pub is_registered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_time: Option<DateTime<Local>>,

    #[serde(default)]
    pub has_collected_lunch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_collection_time: Option<DateTime<Local>>,

    #[serde(default)]
    pub has_collected_kit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kit_collection_time: Option<DateTime<Local>>,

    /// Day (ISO date) → present.
    #[serde(default)]
    pub attendance: BTreeMap<NaiveDate, bool>,

    /// Additional imported CSV attributes.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Attendee {
    /// True when `token` is this attendee's unique id or QR payload.
    pub fn matches_token(&self, token: &str) -> bool {
        self.unique_id == token || self.qr_code_data == token
    }

    /// Case-insensitive substring match over the searchable fields.
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        let hit = |v: &str| v.to_lowercase().contains(needle);

        hit(&self.name)
            || hit(&self.email)
            || self.phone.as_deref().is_some_and(hit)
            || hit(&self.unique_id)
            || self.company.as_deref().is_some_and(hit)
    }

    pub fn display_company(&self) -> &str {
        match self.company.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => "Not Specified",
        }
    }
}

/// Partial attendee used by imports and manual additions.
/// Missing identifiers are generated by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendeeDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub unique_id: Option<String>,
    pub qr_code_data: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl AttendeeDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }
}

/// Changes applied by `update_attendee`. Status flags are not patchable:
/// they only move through check-in and distribution.
#[derive(Debug, Clone, Default)]
pub struct AttendeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl AttendeePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.extra.is_empty()
    }

    pub(crate) fn apply_to(self, a: &mut Attendee) {
        if let Some(v) = self.name {
            a.name = v;
        }
        if let Some(v) = self.email {
            a.email = v;
        }
        if let Some(v) = self.phone {
            a.phone = Some(v);
        }
        if let Some(v) = self.company {
            a.company = Some(v);
        }
        for (k, v) in self.extra {
            if !is_core_field(&k) {
                a.extra.insert(k, v);
            }
        }
    }
}
