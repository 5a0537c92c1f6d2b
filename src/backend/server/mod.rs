//! Server Module
//!
//! Initialization, configuration and shared state of the Axum server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig, environment loading, database setup
//! └── init.rs         - Application assembly
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env()` in `main`
//! 2. **Database**: connect and run migrations, or continue without one
//! 3. **AI**: build the Gemini client behind the `PlannerModel` trait
//! 4. **Router Creation**: configure routes and middleware

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{AiConfig, AuthConfig, ConfigError, Environment, ServerConfig};
pub use init::{create_app, create_app_with};
pub use state::AppState;
