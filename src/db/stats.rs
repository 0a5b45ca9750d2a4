use crate::db::kv::list_entries;
use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) STORED DOCUMENTS
    //
    let entries = list_entries(&pool.conn)?;
    println!("{}• Stored documents:{}", CYAN, RESET);
    if entries.is_empty() {
        println!("    {GREY}--{RESET}");
    }
    for (key, size, updated_at) in entries {
        println!(
            "    {:<16} {}{:>8} B{}  updated {}",
            key, GREEN, size, RESET, updated_at
        );
    }

    //
    // 3) LOG ROWS
    //
    let log_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    println!("{}• Log rows:{} {}{}{}", CYAN, RESET, GREEN, log_rows, RESET);

    //
    // 4) SCHEMA VERSION
    //
    let versions = applied_versions(&pool.conn)?;
    let last = versions
        .last()
        .cloned()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Schema version:{} {}", CYAN, RESET, last);

    println!();
    Ok(())
}
