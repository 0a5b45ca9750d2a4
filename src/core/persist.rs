//! Write queue between the in-memory store and the key–value table.
//!
//! Mutations enqueue a serialized snapshot and return immediately. The queue
//! keeps only the newest snapshot per key; `flush` writes them in the order
//! the keys were first queued.

use crate::db::kv::set_raw;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::error;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug)]
struct PendingWrite {
    key: &'static str,
    payload: String,
}

#[derive(Debug, Default)]
pub struct PersistQueue {
    pending: Vec<PendingWrite>,
    coalesced: usize,
}

impl PersistQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a snapshot of `value` for `key`, replacing any older snapshot.
    pub fn enqueue<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> AppResult<()> {
        let payload = serde_json::to_string(value)?;

        match self.pending.iter_mut().find(|w| w.key == key) {
            Some(w) => {
                w.payload = payload;
                self.coalesced += 1;
            }
            None => self.pending.push(PendingWrite { key, payload }),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Writes replaced by a newer snapshot before reaching storage.
    pub fn coalesced(&self) -> usize {
        self.coalesced
    }

    pub fn is_queued(&self, key: &str) -> bool {
        self.pending.iter().any(|w| w.key == key)
    }

    /// Write every queued snapshot inside one transaction. On failure the
    /// queue is kept so a later flush can retry, and the in-memory state
    /// stays authoritative.
    pub fn flush(&mut self, conn: &Connection) -> AppResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let result = (|| -> AppResult<()> {
            let tx = conn.unchecked_transaction()?;
            for w in &self.pending {
                set_raw(&tx, w.key, &w.payload)?;
            }
            tx.commit()?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                let n = self.pending.len();
                self.pending.clear();
                Ok(n)
            }
            Err(e) => {
                let msg = format!("Failed to save data: {e}");
                error(&msg);
                let _ = ttlog(conn, "persist_error", "", &msg);
                Err(AppError::Persistence(e.to_string()))
            }
        }
    }
}
