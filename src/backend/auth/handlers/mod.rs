//! Authentication Handlers Module
//!
//! HTTP handlers for the `/api/auth` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and token issuing
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! └── refresh.rs  - Token refresh and logout handlers
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register
//! - **`login`** - POST /api/auth/login
//! - **`refresh`** - POST /api/auth/refresh
//! - **`logout`** - POST /api/auth/logout

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Refresh and logout handlers
pub mod refresh;

use crate::backend::auth::sessions::{create_access_token, create_refresh_token};
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::config::AuthConfig;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, UserResponse};

// Re-export handlers
pub use login::login;
pub use refresh::{logout, refresh};
pub use register::register;

/// Issue an access/refresh token pair for `user`
pub(crate) fn issue_tokens(auth: &AuthConfig, user: User) -> Result<AuthResponse, BackendError> {
    let access_token = create_access_token(auth, user.id, &user.email)
        .map_err(|e| BackendError::internal(format!("failed to create access token: {}", e)))?;
    let refresh_token = create_refresh_token(auth, user.id)
        .map_err(|e| BackendError::internal(format!("failed to create refresh token: {}", e)))?;

    Ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}
