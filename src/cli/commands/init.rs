use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database at the configured (or `--db`) path
///  - all pending DB migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    println!("⚙️  Initializing rCheckin…");

    cfg.init_all(cli.test)?;

    let pool = DbPool::open_initialized(&cfg.database)?;

    println!("✅ Database initialized at {}", &cfg.database);

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    println!("🎉 rCheckin initialization completed!");
    Ok(())
}
