//! rCheckin library root.
//! Exposes the CLI parser, the high-level run() function, and the internal
//! modules (attendee store, sync tracker, import/export, persistence).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(cli, cfg),
        Commands::Add(_) | Commands::Edit { .. } => cli::commands::add::handle(cli, cfg),
        Commands::List { .. } | Commands::Show { .. } => cli::commands::list::handle(cli, cfg),
        Commands::Checkin { .. } | Commands::Lunch(_) | Commands::Kit(_) => {
            cli::commands::scan::handle(cli, cfg)
        }
        Commands::Settings(_) => cli::commands::settings::handle(cli, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(cli, cfg),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
        Commands::EndEvent { .. } => cli::commands::end_event::handle(cli, cfg),
        Commands::Archive { .. } => cli::commands::archive::handle(cli, cfg),
        Commands::Status => cli::commands::status::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db overrides the database path
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
