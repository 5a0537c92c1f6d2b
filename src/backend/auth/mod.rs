//! Authentication Module
//!
//! User registration, login and JWT session management.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT access/refresh token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user created → token pair returned
//! 2. **Login**: email and password verified → token pair returned
//! 3. **Refresh**: refresh token verified → new access token returned
//! 4. **Protected routes**: access token checked by `middleware::auth`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (cost 12) on a blocking thread
//! - Access and refresh tokens are signed with different secrets
//! - Invalid credentials return 401 without saying which part was wrong

/// User model and database operations
pub mod users;

/// JWT token management
pub mod sessions;

/// HTTP handlers
pub mod handlers;

// Re-export commonly used items
pub use handlers::{login, logout, refresh, register};
pub use sessions::{Claims, TokenError};
pub use users::User;
