pub mod add;
pub mod archive;
pub mod config;
pub mod db;
pub mod end_event;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod scan;
pub mod settings;
pub mod stats;
pub mod status;
