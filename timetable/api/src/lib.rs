pub mod access;
pub mod config;
pub mod dump;
pub mod errors;
pub mod global;
pub mod store;
pub mod work_groups;

/// The embedded database migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[cfg(test)]
mod tests;
