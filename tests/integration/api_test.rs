//! Router-level tests that run without PostgreSQL
//!
//! Covers the service plumbing, the auth middleware, input validation that
//! happens before the database is touched, and the 503 answer when no
//! database is configured.

use axum::http::StatusCode;
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use planner::backend::auth::Claims;

use crate::common::{access_token, refresh_token, sample_reply, test_server, ScriptedModel, ACCESS_SECRET};

fn error_of(body: &Value) -> (&str, &str) {
    (
        body["error"]["code"].as_str().unwrap_or_default(),
        body["error"]["message"].as_str().unwrap_or_default(),
    )
}

#[tokio::test]
async fn test_health() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    let response = server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"success": true, "message": "API is running"})
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    let response = server.get("/api/does-not-exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        error_of(&body),
        ("NOT_FOUND", "Route GET /api/does-not-exist not found")
    );
}

#[tokio::test]
async fn test_unsupported_method_is_not_found() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    let response = server.get("/api/auth/login").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("NOT_FOUND", "Route GET /api/auth/login not found")
    );
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    for path in ["/api/activities", "/api/notes", "/api/activity-logs"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
        assert_eq!(
            error_of(&response.json::<Value>()),
            ("UNAUTHORIZED", "No token provided")
        );
    }
}

#[tokio::test]
async fn test_expired_token() {
    let server = test_server(ScriptedModel::text(sample_reply()));
    let iat = u64::try_from(chrono::Utc::now().timestamp()).unwrap() - 7200;
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        email: "old@example.com".to_string(),
        iat,
        exp: iat + 60,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(ACCESS_SECRET.as_bytes()),
    )
    .unwrap();

    let response = server.get("/api/activities").authorization_bearer(token).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("TOKEN_EXPIRED", "Access token expired")
    );
}

#[tokio::test]
async fn test_invalid_tokens() {
    let server = test_server(ScriptedModel::text(sample_reply()));
    let user_id = Uuid::new_v4();

    for token in ["not.a.jwt".to_string(), refresh_token(user_id)] {
        let response = server.get("/api/notes").authorization_bearer(token).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            error_of(&response.json::<Value>()),
            ("INVALID_TOKEN", "Invalid access token")
        );
    }
}

#[tokio::test]
async fn test_database_routes_without_database() {
    let server = test_server(ScriptedModel::text(sample_reply()));
    let token = access_token(Uuid::new_v4());
    let id = Uuid::new_v4();

    let responses = [
        server.get("/api/activities").authorization_bearer(&token).await,
        server.get(&format!("/api/activities/{}", id)).authorization_bearer(&token).await,
        server.delete(&format!("/api/notes/{}", id)).authorization_bearer(&token).await,
        server.patch(&format!("/api/notes/{}/pin", id)).authorization_bearer(&token).await,
        server.get("/api/activity-logs").authorization_bearer(&token).await,
    ];

    for response in responses {
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            error_of(&response.json::<Value>()),
            ("SERVICE_UNAVAILABLE", "Database not configured")
        );
    }
}

#[tokio::test]
async fn test_activity_input_checked_before_database() {
    let server = test_server(ScriptedModel::text(sample_reply()));
    let token = access_token(Uuid::new_v4());

    let response = server
        .post("/api/activities")
        .authorization_bearer(&token)
        .json(&json!({"type": "task"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("VALIDATION_ERROR", "title is required")
    );

    let response = server
        .post("/api/activities")
        .authorization_bearer(&token)
        .json(&json!({"title": "Gym", "type": "habit"}))
        .await;
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("VALIDATION_ERROR", "Invalid activity type")
    );

    let response = server
        .patch(&format!("/api/activities/{}/status", Uuid::new_v4()))
        .authorization_bearer(&token)
        .json(&json!({"status": "archived"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("VALIDATION_ERROR", "status must be one of: pending, done, skipped")
    );
}

#[tokio::test]
async fn test_note_input_checked_before_database() {
    let server = test_server(ScriptedModel::text(sample_reply()));
    let token = access_token(Uuid::new_v4());

    let response = server
        .post("/api/notes")
        .authorization_bearer(&token)
        .json(&json!({"title": "Mood", "content": "ok", "source": "robot"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("VALIDATION_ERROR", "Invalid source")
    );
}

#[tokio::test]
async fn test_malformed_json_body() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    let response = server
        .post("/api/auth/login")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_register_validation() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    let response = server
        .post("/api/auth/register")
        .json(&json!({"name": "Budi", "email": "budi@example.com"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(&response.json::<Value>()),
        (
            "VALIDATION_ERROR",
            "name, email, password, dan confirmPassword wajib diisi"
        )
    );

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Budi",
            "email": "budi@example.com",
            "password": "rahasia123",
            "confirmPassword": "rahasia321"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("PASSWORD_MISMATCH", "Password dan konfirmasi password tidak sama")
    );

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Budi",
            "email": "budi@example.com",
            "password": "rahasia123",
            "confirmPassword": "rahasia123"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "budi@example.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("VALIDATION_ERROR", "email dan password wajib diisi")
    );
}

#[tokio::test]
async fn test_refresh_validation() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    let response = server.post("/api/auth/refresh").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("VALIDATION_ERROR", "refreshToken wajib dikirim")
    );

    // An access token is signed with the other secret
    let response = server
        .post("/api/auth/refresh")
        .json(&json!({"refreshToken": access_token(Uuid::new_v4())}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        error_of(&response.json::<Value>()),
        ("INVALID_TOKEN", "Refresh token tidak valid atau sudah expired")
    );

    let response = server
        .post("/api/auth/refresh")
        .json(&json!({"refreshToken": refresh_token(Uuid::new_v4())}))
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_logout() {
    let server = test_server(ScriptedModel::text(sample_reply()));

    let response = server.post("/api/auth/logout").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"success": true, "message": "Logged out successfully", "data": null})
    );
}
