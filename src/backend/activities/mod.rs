//! Activities Module
//!
//! Tasks and scheduled events on the user's calendar.
//!
//! - **`db`** - SQL queries; mutations also append to `activity_logs`
//! - **`handlers`** - `/api/activities` endpoints

pub mod db;
pub mod handlers;

pub use handlers::{
    create_activity, delete_activity, get_activity, list_activities, update_activity, update_status,
};
