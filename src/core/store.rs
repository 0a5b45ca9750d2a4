//! Attendee store: the single owner of the attendee collection, the event
//! settings and the archive.
//!
//! Every mutation updates memory first, then queues a persistence write and,
//! for attendee changes, triggers a sync pulse. Callers flush the queue.

use crate::config::Config;
use crate::core::calculator::stats::calculate_stats;
use crate::core::ids::{generate_qr_code, generate_unique_id, new_record_id};
use crate::core::persist::PersistQueue;
use crate::core::sync::SharedSync;
use crate::db::kv::{self, KEY_ARCHIVED_EVENTS, KEY_ATTENDEES, KEY_EVENT_SETTINGS};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::export::report::report_csv_string;
use crate::models::attendee::is_core_field;
use crate::models::{
    ArchivedEvent, Attendee, AttendeeDraft, AttendeePatch, EventSettings, SettingsPatch,
};
use crate::ui::messages::{error, warning};
use chrono::{DateTime, Local};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// Which status an identifier-driven operation moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    CheckIn,
    Lunch,
    Kit,
}

impl ScanAction {
    pub fn label(&self) -> &'static str {
        match self {
            ScanAction::CheckIn => "checkin",
            ScanAction::Lunch => "lunch",
            ScanAction::Kit => "kit",
        }
    }

    fn is_done(&self, a: &Attendee) -> bool {
        match self {
            ScanAction::CheckIn => a.is_registered,
            ScanAction::Lunch => a.has_collected_lunch,
            ScanAction::Kit => a.has_collected_kit,
        }
    }

    fn apply(&self, a: &mut Attendee, now: DateTime<Local>) {
        match self {
            ScanAction::CheckIn => {
                a.is_registered = true;
                a.registration_time = Some(now);
                a.attendance.insert(now.date_naive(), true);
            }
            ScanAction::Lunch => {
                a.has_collected_lunch = true;
                a.lunch_collection_time = Some(now);
            }
            ScanAction::Kit => {
                a.has_collected_kit = true;
                a.kit_collection_time = Some(now);
            }
        }
    }
}

/// Result of a check-in or distribution.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// No attendee has this unique id or QR payload.
    NotFound,
    /// The status moved false → true; carries the updated record.
    Updated(Attendee),
    /// The status was already set; nothing changed.
    AlreadyDone(Attendee),
}

impl ScanOutcome {
    pub fn attendee(&self) -> Option<&Attendee> {
        match self {
            ScanOutcome::NotFound => None,
            ScanOutcome::Updated(a) | ScanOutcome::AlreadyDone(a) => Some(a),
        }
    }
}

/// Values the store falls back to when settings are reset.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub default_event_name: String,
    pub default_venue: String,
    pub date_format: String,
}

impl StoreOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            default_event_name: cfg.default_event_name.clone(),
            default_venue: cfg.default_venue.clone(),
            date_format: cfg.date_format.clone(),
        }
    }

    fn default_settings(&self) -> EventSettings {
        EventSettings::with_defaults(&self.default_event_name, &self.default_venue)
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug)]
pub struct AttendeeStore {
    state: LoadState,
    attendees: Vec<Attendee>,
    settings: EventSettings,
    archived: Vec<ArchivedEvent>,
    options: StoreOptions,
    queue: PersistQueue,
    sync: SharedSync,
}

impl AttendeeStore {
    /// New store in the loading state; call [`AttendeeStore::load`] next.
    pub fn new(options: StoreOptions, sync: SharedSync) -> Self {
        Self {
            state: LoadState::Loading,
            attendees: Vec::new(),
            settings: options.default_settings(),
            archived: Vec::new(),
            options,
            queue: PersistQueue::new(),
            sync,
        }
    }

    /// Construct and load in one step.
    pub fn open(conn: &Connection, options: StoreOptions, sync: SharedSync) -> Self {
        let mut store = Self::new(options, sync);
        store.load(conn);
        store
    }

    /// Read persisted data. Missing or malformed entries leave the defaults
    /// in place; problems are reported and logged, never returned.
    pub fn load(&mut self, conn: &Connection) {
        if let Some(list) = load_entry::<Vec<Attendee>>(conn, KEY_ATTENDEES) {
            self.attendees = list;
        }
        if let Some(settings) = load_entry::<EventSettings>(conn, KEY_EVENT_SETTINGS) {
            self.settings = settings;
        }
        if let Some(archived) = load_entry::<Vec<ArchivedEvent>>(conn, KEY_ARCHIVED_EVENTS) {
            self.archived = archived;
        }
        self.state = LoadState::Ready;
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    fn ensure_ready(&self) -> AppResult<()> {
        match self.state {
            LoadState::Ready => Ok(()),
            LoadState::Loading => Err(AppError::StoreNotReady),
        }
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn settings(&self) -> &EventSettings {
        &self.settings
    }

    pub fn archived_events(&self) -> &[ArchivedEvent] {
        &self.archived
    }

    pub fn sync(&self) -> &SharedSync {
        &self.sync
    }

    /// Writes queued and not yet flushed.
    pub fn pending_writes(&self) -> usize {
        self.queue.len()
    }

    /// Persist every queued change.
    pub fn flush(&mut self, conn: &Connection) -> AppResult<usize> {
        self.queue.flush(conn)
    }

    fn attendees_changed(&mut self) -> AppResult<()> {
        self.queue.enqueue(KEY_ATTENDEES, &self.attendees)?;
        self.sync.borrow_mut().trigger_sync();
        Ok(())
    }

    fn settings_changed(&mut self) -> AppResult<()> {
        self.queue.enqueue(KEY_EVENT_SETTINGS, &self.settings)
    }

    // ---------------------------
    // Mutations
    // ---------------------------

    /// Append new attendees, generating any missing identifier and seeding
    /// attendance from the current settings. Returns the created records.
    pub fn add_attendees(&mut self, drafts: Vec<AttendeeDraft>) -> AppResult<Vec<Attendee>> {
        self.ensure_ready()?;

        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let attendance = self.initial_attendance();

        let created: Vec<Attendee> = drafts
            .into_iter()
            .map(|d| {
                let unique_id = d
                    .unique_id
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(generate_unique_id);
                let qr_code_data = d
                    .qr_code_data
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| generate_qr_code(&unique_id));

                Attendee {
                    id: new_record_id(),
                    unique_id,
                    qr_code_data,
                    name: d.name,
                    email: d.email,
                    phone: d.phone,
                    company: d.company,
                    is_registered: false,
                    registration_time: None,
                    has_collected_lunch: false,
                    lunch_collection_time: None,
                    has_collected_kit: false,
                    kit_collection_time: None,
                    attendance: attendance.clone(),
                    extra: d
                        .extra
                        .into_iter()
                        .filter(|(k, _)| !is_core_field(k))
                        .collect(),
                }
            })
            .collect();

        self.attendees.extend(created.iter().cloned());
        self.attendees_changed()?;

        Ok(created)
    }

    fn initial_attendance(&self) -> BTreeMap<chrono::NaiveDate, bool> {
        if self.settings.is_multi_day {
            self.settings.days.iter().map(|d| (*d, false)).collect()
        } else {
            BTreeMap::from([(Local::now().date_naive(), false)])
        }
    }

    /// Merge `patch` into the attendee with `id`. Returns `false` (and changes
    /// nothing) when there is no such attendee.
    pub fn update_attendee(&mut self, id: &str, patch: AttendeePatch) -> AppResult<bool> {
        self.ensure_ready()?;

        let Some(a) = self.attendees.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };

        patch.apply_to(a);
        self.attendees_changed()?;
        Ok(true)
    }

    pub fn register_attendee(&mut self, token: &str) -> AppResult<ScanOutcome> {
        self.scan(token, ScanAction::CheckIn)
    }

    pub fn distribute_lunch(&mut self, token: &str) -> AppResult<ScanOutcome> {
        self.scan(token, ScanAction::Lunch)
    }

    pub fn distribute_kit(&mut self, token: &str) -> AppResult<ScanOutcome> {
        self.scan(token, ScanAction::Kit)
    }

    pub fn scan(&mut self, token: &str, action: ScanAction) -> AppResult<ScanOutcome> {
        self.scan_at(token, action, Local::now())
    }

    /// Look the token up as unique id or QR payload and move the status of
    /// `action`. Idempotent: a status already set is left untouched.
    /// Distribution does not require a prior check-in.
    pub fn scan_at(
        &mut self,
        token: &str,
        action: ScanAction,
        now: DateTime<Local>,
    ) -> AppResult<ScanOutcome> {
        self.ensure_ready()?;

        let token = token.trim();
        let Some(a) = self.attendees.iter_mut().find(|a| a.matches_token(token)) else {
            return Ok(ScanOutcome::NotFound);
        };

        if action.is_done(a) {
            return Ok(ScanOutcome::AlreadyDone(a.clone()));
        }

        action.apply(a, now);
        let updated = a.clone();
        self.attendees_changed()?;

        Ok(ScanOutcome::Updated(updated))
    }

    /// Merge `patch` into the event settings. Attendance maps of existing
    /// attendees are not adjusted to a changed day set.
    pub fn update_event_settings(&mut self, patch: SettingsPatch) -> AppResult<&EventSettings> {
        self.ensure_ready()?;

        patch.apply_to(&mut self.settings);
        self.settings_changed()?;
        Ok(&self.settings)
    }

    /// Archive the live event (settings, stats, final report) and start over
    /// with an empty collection and default settings. Irreversible.
    pub fn end_event(&mut self) -> AppResult<ArchivedEvent> {
        self.end_event_at(Local::now())
    }

    pub fn end_event_at(&mut self, now: DateTime<Local>) -> AppResult<ArchivedEvent> {
        self.ensure_ready()?;

        let csv_data = report_csv_string(&self.attendees, &self.options.date_format)?;

        let archived = ArchivedEvent {
            id: new_record_id(),
            settings: self.settings.clone(),
            stats: calculate_stats(&self.attendees),
            end_date: now,
            csv_data,
        };

        self.archived.push(archived.clone());
        self.queue.enqueue(KEY_ARCHIVED_EVENTS, &self.archived)?;

        self.attendees.clear();
        self.settings = self.options.default_settings();
        self.attendees_changed()?;
        self.settings_changed()?;

        Ok(archived)
    }

    // ---------------------------
    // Queries
    // ---------------------------

    /// Case-insensitive substring search over name, email, phone, unique id
    /// and company. A blank query returns the whole collection.
    pub fn search_attendees(&self, query: &str) -> Vec<&Attendee> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.attendees.iter().collect();
        }

        self.attendees.iter().filter(|a| a.matches_query(&q)).collect()
    }

    pub fn get_attendee_by_id(&self, id: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.id == id)
    }

    pub fn get_attendee_by_unique_id(&self, unique_id: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.unique_id == unique_id)
    }

    pub fn get_attendee_by_qr_code(&self, qr_code: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.qr_code_data == qr_code)
    }

    /// Unique id, QR payload or record id, in that order.
    pub fn find_by_any(&self, token: &str) -> Option<&Attendee> {
        let token = token.trim();
        self.get_attendee_by_unique_id(token)
            .or_else(|| self.get_attendee_by_qr_code(token))
            .or_else(|| self.get_attendee_by_id(token))
    }

    /// Archived event by full id or by an id prefix (as shown in listings).
    /// A prefix shared by several archives matches none of them.
    pub fn get_archived_event(&self, id: &str) -> Option<&ArchivedEvent> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        if let Some(e) = self.archived.iter().find(|e| e.id == id) {
            return Some(e);
        }

        let mut matches = self.archived.iter().filter(|e| e.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(e), None) => Some(e),
            _ => None,
        }
    }
}

/// Read and decode one entry; `None` when absent, malformed or unreadable.
fn load_entry<T: DeserializeOwned>(conn: &Connection, key: &str) -> Option<T> {
    match kv::get_item::<T>(conn, key) {
        Ok(v) => v,
        Err(AppError::Json(e)) => {
            let msg = format!("Stored '{key}' is malformed and was ignored: {e}");
            warning(&msg);
            let _ = ttlog(conn, "load_error", key, &msg);
            None
        }
        Err(e) => {
            let msg = format!("Failed to load '{key}' from storage: {e}");
            error(&msg);
            let _ = ttlog(conn, "load_error", key, &msg);
            None
        }
    }
}
