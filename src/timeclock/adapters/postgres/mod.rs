//! `PostgreSQL` adapters for the timeclock ports.

mod activity_log;
mod models;
mod repository;
mod schema;

pub use activity_log::PostgresActivityLog;
pub use repository::{PostgresTaskRepository, TimeclockPgPool};
