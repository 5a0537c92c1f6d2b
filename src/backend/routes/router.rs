/**
 * Router Configuration
 *
 * Assembles the full application router:
 *
 * 1. Health check
 * 2. API routes (auth, activities, notes, activity logs, AI)
 * 3. Fallback handler returning the 404 envelope
 * 4. Request tracing and CORS layers
 */

use axum::{
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "API is running",
    }))
}

/// Fallback for unknown routes and unsupported methods
pub async fn route_not_found(method: Method, uri: Uri) -> BackendError {
    BackendError::handler(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        format!("Route {} {} not found", method, uri.path()),
    )
}

/// CORS policy allowing the configured frontend origin
///
/// An origin that is not a valid header value is logged and no cross-origin
/// access is granted.
pub fn cors_layer(frontend_url: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => base.allow_origin(origin).allow_credentials(true),
        Err(e) => {
            tracing::warn!("Invalid FRONTEND_URL {:?}: {}", frontend_url, e);
            base
        }
    }
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state shared by all handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/api/health", get(health));

    // Add API routes
    let router = configure_api_routes(router, &app_state);

    // Fallback handlers for 404
    let router = router
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found);

    let router = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&app_state.config.frontend_url)),
    );

    router.with_state(app_state)
}
