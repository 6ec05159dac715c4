pub mod config;
pub mod database;
pub mod global;
pub mod logging;
