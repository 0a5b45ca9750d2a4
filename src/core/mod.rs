pub mod calculator;
pub mod ids;
pub mod import;
pub mod log;
pub mod persist;
pub mod store;
pub mod sync;
