/**
 * Application State Management
 *
 * `AppState` is the central state container handed to the router. The
 * `FromRef` implementations let handlers extract only the part they need,
 * e.g. `State<Option<PgPool>>` or `State<AiService>`.
 *
 * # Thread Safety
 *
 * Nothing here is mutable after startup: the config sits behind an `Arc`,
 * `PgPool` is internally synchronized, and `AiService` keeps no per-request
 * state.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::ai::AiService;
use crate::backend::server::config::{AuthConfig, ServerConfig};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup
    pub config: Arc<ServerConfig>,

    /// Database connection pool
    ///
    /// `None` when `DATABASE_URL` is unset or unreachable. Handlers that
    /// need the database answer 503 in that case.
    pub db_pool: Option<PgPool>,

    /// AI normalization pipeline
    pub ai: AiService,
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for AiService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.ai.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

/// JWT settings, for the auth handlers and middleware
impl FromRef<AppState> for AuthConfig {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.auth.clone()
    }
}
