//! Unified application error type.
//! Every layer (db, core, export, cli) returns AppError so that failures
//! are reported the same way at the command boundary.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Attendee store is still loading")]
    StoreNotReady,

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid column mapping: {0}")]
    InvalidMapping(String),

    #[error("Import failed with {} validation error(s)", .0.len())]
    ImportValidation(Vec<String>),

    // ---------------------------
    // Lookup
    // ---------------------------
    #[error("Archived event not found: {0}")]
    ArchiveNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
