#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rcheckin::core::store::{AttendeeStore, StoreOptions};
use rcheckin::core::sync::SyncStatusTracker;
use rcheckin::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rci() -> Command {
    cargo_bin_cmd!("rcheckin")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcheckin.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a temp CSV file and return its path
pub fn write_csv(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_in.csv", name));
    fs::write(&path, content).expect("write csv");
    path.to_string_lossy().to_string()
}

/// Empty temp directory, recreated on every call
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcheckin_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

pub const SAMPLE_CSV: &str = "\
Full Name,Email Address,Phone,Company,T-Shirt
Ada Lovelace,ada@example.com,555-0100,ACME Corp,M
Alan Turing,alan@example.com,,Bletchley,L
Grace Hopper,grace@example.com,555-0102,acme labs,S
";

/// Initialize DB and import the sample attendees
pub fn init_db_with_data(db_path: &str, name: &str) {
    rci()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    let csv = write_csv(name, SAMPLE_CSV);
    rci()
        .args(["--db", db_path, "import", "--file", &csv])
        .assert()
        .success();
}

/// In-memory database with the schema applied
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    rcheckin::db::initialize::init_db(&pool.conn).expect("init db");
    pool
}

/// Loaded store over `pool`, sync tracker online
pub fn ready_store(pool: &DbPool) -> AttendeeStore {
    let sync = SyncStatusTracker::with_delay_ms(true, 1500).shared();
    AttendeeStore::open(&pool.conn, StoreOptions::default(), sync)
}

/// Stored unique id of the attendee whose name matches `name`
pub fn unique_id_of(db_path: &str, name: &str) -> String {
    let pool = DbPool::new(db_path).expect("open db");
    let store = ready_store(&pool);
    store
        .search_attendees(name)
        .first()
        .map(|a| a.unique_id.clone())
        .expect("attendee present")
}
