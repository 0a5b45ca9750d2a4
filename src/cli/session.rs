//! Per-command wiring of database, sync tracker and attendee store.

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::store::{AttendeeStore, StoreOptions};
use crate::core::sync::SyncStatusTracker;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};

pub struct Session {
    pub pool: DbPool,
    pub store: AttendeeStore,
}

impl Session {
    /// Open the database (creating the schema if needed) and load the store.
    pub fn open(cli: &Cli, cfg: &Config) -> AppResult<Self> {
        let pool = DbPool::open_initialized(&cfg.database)?;

        let sync = SyncStatusTracker::with_delay_ms(!cli.offline, cfg.sync_delay_ms).shared();
        let store = AttendeeStore::open(&pool.conn, StoreOptions::from_config(cfg), sync);

        Ok(Self { pool, store })
    }

    /// Audit row; a failure here never aborts the command.
    pub fn log(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }

    /// Persist queued writes and let in-flight sync pulses complete.
    /// A failed save has already been reported and logged by the flush; it
    /// does not turn into a command error.
    pub fn finish(mut self) -> AppResult<()> {
        match self.store.flush(&self.pool.conn) {
            Ok(_) | Err(AppError::Persistence(_)) => {}
            Err(e) => return Err(e),
        }

        let mut sync = self.store.sync().borrow_mut();
        let completed = sync.settle();
        let pending = sync.status().pending_changes;

        if pending > 0 {
            info(format!("Offline: {pending} change(s) pending sync."));
        } else if completed > 0
            && let Some(at) = sync.status().last_synced
        {
            info(format!("Synced at {}.", at.format("%H:%M:%S")));
        }

        Ok(())
    }
}
