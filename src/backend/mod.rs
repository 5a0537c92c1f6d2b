//! Backend Module
//!
//! All server-side code for the planner: an Axum HTTP server over
//! PostgreSQL, JWT authentication and the AI parsing pipeline.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Registration, login, JWT tokens, user storage
//! - **`middleware`** - Bearer token authentication
//! - **`activities`** - Tasks and schedules
//! - **`notes`** - Notes and pinning
//! - **`activity_logs`** - Audit trail of activity changes
//! - **`ai`** - Prompt building, model client, response validation
//! - **`error`** - `BackendError` and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── activities/     - Activity endpoints and queries
//! ├── notes/          - Note endpoints and queries
//! ├── activity_logs/  - Activity log endpoint and queries
//! ├── ai/             - AI parsing pipeline
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the optional database pool and the
//! AI service. Nothing in it is mutated after startup, so it is cloned into
//! each handler without locks.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error renders itself as
//! the JSON error envelope with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Activities
pub mod activities;

/// Notes
pub mod notes;

/// Activity logs
pub mod activity_logs;

/// AI parsing pipeline
pub mod ai;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, create_app_with};
