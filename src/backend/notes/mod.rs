//! Notes Module
//!
//! Free-form reflections, optionally tied to a day and pinned to the top.

pub mod db;
pub mod handlers;

pub use handlers::{create_note, delete_note, get_note, list_notes, toggle_pin, update_note};
