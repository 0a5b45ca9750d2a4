//! Simulated synchronization status.
//!
//! No network I/O happens here: a sync pulse is a deferred completion
//! scheduled `delay` after it starts. Pulses are never cancelled, so
//! overlapping pulses all complete and the last completion wins.

use crate::models::SyncStatus;
use chrono::{DateTime, Duration, Local};
use std::cell::RefCell;
use std::rc::Rc;

/// Tracker shared between the attendee store and the command layer.
pub type SharedSync = Rc<RefCell<SyncStatusTracker>>;

#[derive(Debug)]
pub struct SyncStatusTracker {
    online: bool,
    status: SyncStatus,
    delay: Duration,
    /// Completion deadlines of pulses still in flight, in start order.
    in_flight: Vec<DateTime<Local>>,
    pulses_started: u32,
}

impl SyncStatusTracker {
    pub fn new(online: bool, delay: Duration) -> Self {
        Self {
            online,
            status: SyncStatus::default(),
            delay,
            in_flight: Vec::new(),
            pulses_started: 0,
        }
    }

    /// Delays beyond what `Duration` can hold are clamped to its maximum.
    pub fn with_delay_ms(online: bool, delay_ms: u64) -> Self {
        let delay = i64::try_from(delay_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .unwrap_or(Duration::MAX);
        Self::new(online, delay)
    }

    pub fn shared(self) -> SharedSync {
        Rc::new(RefCell::new(self))
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    /// Number of pulses started since construction (offline triggers excluded).
    pub fn pulses_started(&self) -> u32 {
        self.pulses_started
    }

    pub fn trigger_sync(&mut self) {
        self.trigger_sync_at(Local::now());
    }

    /// Offline: count one pending change. Online: start a pulse ending at
    /// `now + delay`, or at `now` when that is past the representable range.
    pub fn trigger_sync_at(&mut self, now: DateTime<Local>) {
        if !self.online {
            self.status.pending_changes += 1;
            return;
        }

        self.status.syncing = true;
        let deadline = now.checked_add_signed(self.delay).unwrap_or(now);
        self.in_flight.push(deadline);
        self.pulses_started += 1;
    }

    pub fn set_online(&mut self, online: bool) {
        self.set_online_at(online, Local::now());
    }

    /// Connectivity change. Coming back online with pending changes starts
    /// exactly one pulse.
    pub fn set_online_at(&mut self, online: bool, now: DateTime<Local>) {
        let was_online = self.online;
        self.online = online;

        if !was_online && online && self.status.pending_changes > 0 {
            self.trigger_sync_at(now);
        }
    }

    /// Complete every pulse whose deadline is at or before `now`.
    /// Returns how many completed.
    pub fn poll(&mut self, now: DateTime<Local>) -> usize {
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.in_flight)
            .into_iter()
            .partition(|d| *d <= now);
        self.in_flight = later;

        for deadline in &due {
            self.complete(*deadline);
        }
        due.len()
    }

    /// Let all in-flight pulses finish as if their latency had elapsed.
    pub fn settle(&mut self) -> usize {
        let due = std::mem::take(&mut self.in_flight);
        for deadline in &due {
            self.complete(*deadline);
        }
        due.len()
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    fn complete(&mut self, at: DateTime<Local>) {
        self.status = SyncStatus {
            syncing: false,
            last_synced: Some(at),
            pending_changes: 0,
        };
    }
}
