/**
 * Server Initialization
 *
 * Builds the application from a `ServerConfig`:
 *
 * 1. Connect to the database and apply migrations (optional)
 * 2. Create the Gemini client and the AI service
 * 3. Assemble `AppState` and the router
 *
 * `create_app_with` takes an explicit pool and model, which is how the
 * integration tests run the router without PostgreSQL or network access.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::backend::ai::{AiService, GeminiClient, ModelError, PlannerModel};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails only if the HTTP client for the model cannot be built. A missing
/// or unreachable database is logged and the server continues without it.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, ModelError> {
    tracing::info!("Initializing planner backend server");

    let db_pool = load_database(config.database_url.as_deref()).await;
    let model: Arc<dyn PlannerModel> = Arc::new(GeminiClient::new(&config.ai)?);
    tracing::info!("Using Gemini model {}", model.model_name());

    Ok(create_app_with(config, db_pool, model))
}

/// Assemble the router from already-initialized services
pub fn create_app_with(
    config: ServerConfig,
    db_pool: Option<PgPool>,
    model: Arc<dyn PlannerModel>,
) -> Router<()> {
    let app_state = AppState {
        config: Arc::new(config),
        db_pool,
        ai: AiService::new(model),
    };

    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
