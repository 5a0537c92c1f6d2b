//! Planner - Main Library
//!
//! Backend for a personal planner: users register and log in, then manage
//! activities (tasks and schedules) and notes. Free-text input can be turned
//! into draft activities and notes by an external language model whose output
//! is validated and normalized before it reaches the caller.
//!
//! # Module Structure
//!
//! - **`shared`** - Transport-agnostic types
//!   - Activity, note and activity-log records plus their request types
//!   - Response envelope, calendar helpers, shared error type
//!
//! - **`backend`** - Axum HTTP server
//!   - Server initialization, configuration and state
//!   - Authentication (JWT access/refresh tokens, bcrypt passwords)
//!   - Activity, note and activity-log endpoints over PostgreSQL
//!   - AI pipeline: prompt builder, response extractor, schema validator
//!
//! # Error Handling
//!
//! - `shared::SharedError` for field validation and decoding failures
//! - `backend::ai::AiError` for the AI normalization pipeline
//! - `backend::BackendError` at the HTTP boundary, rendered as
//!   `{"success": false, "error": {"code", "message"}}`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
