//! Activity Logs Module
//!
//! Read side of the audit trail written by `activities::db`.

pub mod db;
pub mod handlers;

pub use handlers::list_logs;
