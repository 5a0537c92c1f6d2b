//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer token authentication for protected routes
//!
//! # Example
//!
//! ```text
//! Router::new()
//!     .nest("/api/activities", activity_routes())
//!     .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
//! ```

pub mod auth;

pub use auth::{auth_middleware, bearer_token, AuthUser, AuthenticatedUser};
