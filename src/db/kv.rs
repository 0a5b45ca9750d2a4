//! Key–value access to the `kv_store` table.
//! Values are JSON documents; the table has no notion of their schema.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const KEY_ATTENDEES: &str = "attendees";
pub const KEY_EVENT_SETTINGS: &str = "eventSettings";
pub const KEY_ARCHIVED_EVENTS: &str = "archivedEvents";

/// Raw JSON text stored under `key`, if any.
pub fn get_raw(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare_cached("SELECT value FROM kv_store WHERE key = ?1")?;
    let value = stmt
        .query_row([key], |row| row.get::<_, String>(0))
        .optional()?;
    Ok(value)
}

/// Replace the JSON text stored under `key`.
pub fn set_raw(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )?;
    stmt.execute(params![key, value, now])?;
    Ok(())
}

/// Decode the value under `key`. Returns `Ok(None)` when the key is absent,
/// and a JSON error when it is present but malformed.
pub fn get_item<T: DeserializeOwned>(conn: &Connection, key: &str) -> AppResult<Option<T>> {
    match get_raw(conn, key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn set_item<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> AppResult<()> {
    let raw = serde_json::to_string(value)?;
    set_raw(conn, key, &raw)
}

pub fn remove_item(conn: &Connection, key: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
    Ok(n > 0)
}

/// (key, size in bytes, updated_at) for every stored entry.
pub fn list_entries(conn: &Connection) -> AppResult<Vec<(String, usize, String)>> {
    let mut stmt =
        conn.prepare("SELECT key, length(value), updated_at FROM kv_store ORDER BY key ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)? as usize,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
