//! Shared Module
//!
//! Types and helpers that do not depend on the HTTP server: the planner's
//! records and request bodies, the response envelope, calendar helpers for
//! the reference timezone, and the shared error type.

/// Activity records, enumerations and request bodies
pub mod activity;

/// Note records and request bodies
pub mod note;

/// Activity audit log entries
pub mod activity_log;

/// Success/error response envelope
pub mod response;

/// Reference timezone and calendar date helpers
pub mod dates;

/// Shared error types
pub mod error;

/// Serde helpers for partial updates
pub mod patch;

/// Re-export commonly used types for convenience
pub use activity::{Activity, ActivityStatus, ActivityType, Priority, Source};
pub use activity_log::{ActivityLogEntry, LogAction};
pub use error::SharedError;
pub use note::Note;
pub use response::{ApiResponse, ErrorBody, ErrorResponse};
