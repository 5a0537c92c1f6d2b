/**
 * API Route Configuration
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/refresh` - Trade a refresh token for an access token
 * - `POST /api/auth/logout` - Stateless logout
 *
 * ## Activities (protected)
 * - `GET/POST /api/activities`
 * - `GET/PUT/DELETE /api/activities/{id}`
 * - `PATCH /api/activities/{id}/status`
 *
 * ## Notes (protected)
 * - `GET/POST /api/notes`
 * - `GET/PUT/DELETE /api/notes/{id}`
 * - `PATCH /api/notes/{id}/pin`
 *
 * ## Activity logs (protected)
 * - `GET /api/activity-logs`
 *
 * ## AI (protected)
 * - `POST /api/ai/parse`
 */

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::backend::activities;
use crate::backend::activity_logs;
use crate::backend::ai::parse_prompt;
use crate::backend::auth::{login, logout, refresh, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::notes;
use crate::backend::server::state::AppState;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

fn activity_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route(
            "/{id}",
            get(activities::get_activity)
                .put(activities::update_activity)
                .delete(activities::delete_activity),
        )
        .route("/{id}/status", patch(activities::update_status))
}

fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route(
            "/{id}",
            get(notes::get_note).put(notes::update_note).delete(notes::delete_note),
        )
        .route("/{id}/pin", patch(notes::toggle_pin))
}

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - Needed by the auth middleware on protected routes
///
/// # Authentication
///
/// Everything except `/api/auth/*` runs behind `auth_middleware`. The
/// middleware is attached with `route_layer`, so unknown paths still reach
/// the 404 fallback instead of answering 401.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/api/activities", activity_routes())
        .nest("/api/notes", note_routes())
        .route("/api/activity-logs", get(activity_logs::list_logs))
        .route("/api/ai/parse", post(parse_prompt))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    router.nest("/api/auth", auth_routes()).merge(protected)
}
