//! End-to-end tests against PostgreSQL
//!
//! Ignored by default; run with `DATABASE_URL=... cargo test -- --ignored`.

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use planner::backend::activities::db;
use planner::shared::{ActivityStatus, LogAction};

use crate::common::database::{create_test_pool, unique_email};
use crate::common::{sample_reply, test_server_with, ScriptedModel};

async fn server() -> TestServer {
    let pool = create_test_pool().await;
    test_server_with(ScriptedModel::text(sample_reply()), Some(pool))
}

/// Register a fresh user and return `(access_token, refresh_token)`
async fn register(server: &TestServer, email: &str) -> (String, String) {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Budi",
            "email": email,
            "password": "rahasia123",
            "confirmPassword": "rahasia123"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["message"], json!("User registered successfully"));
    assert_eq!(body["data"]["user"]["email"], json!(email));
    assert!(body["data"]["user"].get("passwordHash").is_none());
    (
        body["data"]["accessToken"].as_str().unwrap().to_string(),
        body["data"]["refreshToken"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_login_refresh() {
    let server = server().await;
    let email = unique_email();
    let (_, refresh_token) = register(&server, &email).await;

    let duplicate = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Budi",
            "email": email,
            "password": "rahasia123",
            "confirmPassword": "rahasia123"
        }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
    assert_eq!(duplicate.json::<Value>()["error"]["message"], json!("Email sudah terdaftar"));

    let wrong = server
        .post("/api/auth/login")
        .json(&json!({"email": email, "password": "salah12345"}))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.json::<Value>()["error"]["code"], json!("INVALID_CREDENTIALS"));

    let login = server
        .post("/api/auth/login")
        .json(&json!({"email": email, "password": "rahasia123"}))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
    assert_eq!(login.json::<Value>()["message"], json!("Login successful"));

    let refreshed = server
        .post("/api/auth/refresh")
        .json(&json!({"refreshToken": refresh_token}))
        .await;
    assert_eq!(refreshed.status_code(), StatusCode::OK);
    assert!(refreshed.json::<Value>()["data"]["accessToken"].is_string());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_activity_lifecycle_writes_logs() {
    let server = server().await;
    let (token, _) = register(&server, &unique_email()).await;

    let created = server
        .post("/api/activities")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Rapat tim",
            "type": "schedule",
            "date": "2025-03-03",
            "startTime": "09:00",
            "priority": "high"
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let activity = created.json::<Value>()["data"].clone();
    assert_eq!(activity["status"], json!("pending"));
    assert_eq!(activity["source"], json!("manual"));
    assert_eq!(activity["date"], json!("2025-03-03"));
    let id = activity["id"].as_str().unwrap().to_string();

    let updated = server
        .put(&format!("/api/activities/{}", id))
        .authorization_bearer(&token)
        .json(&json!({"priority": null, "endTime": "10:00"}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let data = updated.json::<Value>()["data"].clone();
    assert_eq!(data["priority"], Value::Null);
    assert_eq!(data["endTime"], json!("10:00"));
    assert_eq!(data["startTime"], json!("09:00"));

    let done = server
        .patch(&format!("/api/activities/{}/status", id))
        .authorization_bearer(&token)
        .json(&json!({"status": "done"}))
        .await;
    assert_eq!(done.status_code(), StatusCode::OK);
    assert_eq!(done.json::<Value>()["message"], json!("Status updated"));

    let listed = server
        .get("/api/activities?date=2025-03-03&status=done&priority=bogus")
        .authorization_bearer(&token)
        .await;
    assert_eq!(listed.json::<Value>()["data"].as_array().unwrap().len(), 1);

    let logs = server
        .get(&format!("/api/activity-logs?activityId={}", id))
        .authorization_bearer(&token)
        .await;
    let entries = logs.json::<Value>()["data"].clone();
    let actions: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["completed", "updated", "created"]);
    assert_eq!(entries[0]["activity"]["title"], json!("Rapat tim"));
    assert_eq!(entries[0]["activity"]["type"], json!("schedule"));

    let deleted = server
        .delete(&format!("/api/activities/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);

    let missing = server
        .get(&format!("/api/activities/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["error"]["message"], json!("Activity not found"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_updates_keep_both_changes() {
    let pool = create_test_pool().await;
    let server = test_server_with(ScriptedModel::text(sample_reply()), Some(pool.clone()));
    let (token, _) = register(&server, &unique_email()).await;

    let created = server
        .post("/api/activities")
        .authorization_bearer(&token)
        .json(&json!({"title": "Belajar", "type": "task", "date": "2025-03-04"}))
        .await;
    let id: Uuid = created.json::<Value>()["data"]["id"].as_str().unwrap().parse().unwrap();

    // A title edit holds the row while a status change arrives
    let mut edit = pool.begin().await.unwrap();
    let mut editing = db::lock_activity(&mut *edit, id).await.unwrap().unwrap();

    let status_pool = pool.clone();
    let status_change = tokio::spawn(async move {
        let mut tx = status_pool.begin().await.unwrap();
        let mut activity = db::lock_activity(&mut *tx, id).await.unwrap().unwrap();
        activity.status = ActivityStatus::Done;
        db::save_activity(&mut *tx, &activity, LogAction::Completed).await.unwrap();
        tx.commit().await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!status_change.is_finished());

    editing.title = "Belajar Rust".to_string();
    db::save_activity(&mut *edit, &editing, LogAction::Updated).await.unwrap();
    edit.commit().await.unwrap();
    status_change.await.unwrap();

    let current = db::get_activity(&pool, id).await.unwrap().unwrap();
    assert_eq!(current.title, "Belajar Rust");
    assert_eq!(current.status, ActivityStatus::Done);

    let logs = server
        .get(&format!("/api/activity-logs?activityId={}", id))
        .authorization_bearer(&token)
        .await;
    let actions: Vec<String> = logs.json::<Value>()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(actions, vec!["completed", "updated", "created"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_other_users_records_are_forbidden() {
    let server = server().await;
    let (owner, _) = register(&server, &unique_email()).await;
    let (intruder, _) = register(&server, &unique_email()).await;

    let note = server
        .post("/api/notes")
        .authorization_bearer(&owner)
        .json(&json!({"title": "Rahasia", "content": "isi", "source": "manual"}))
        .await;
    let id = note.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

    let response = server
        .get(&format!("/api/notes/{}", id))
        .authorization_bearer(&intruder)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"],
        json!({"code": "FORBIDDEN", "message": "Access denied"})
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_note_pin_toggle_and_ordering() {
    let server = server().await;
    let (token, _) = register(&server, &unique_email()).await;

    for title in ["Pertama", "Kedua"] {
        let response = server
            .post("/api/notes")
            .authorization_bearer(&token)
            .json(&json!({"title": title, "content": "isi", "source": "ai", "relatedDate": "2025-03-02"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let notes = server.get("/api/notes").authorization_bearer(&token).await;
    let first_id = notes.json::<Value>()["data"][1]["id"].as_str().unwrap().to_string();

    let pinned = server
        .patch(&format!("/api/notes/{}/pin", first_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(pinned.json::<Value>()["message"], json!("Note pinned"));

    let notes = server.get("/api/notes").authorization_bearer(&token).await;
    let data = notes.json::<Value>()["data"].clone();
    assert_eq!(data[0]["title"], json!("Pertama"));
    assert_eq!(data[0]["isPinned"], json!(true));
    assert_eq!(data[1]["title"], json!("Kedua"));

    let only_pinned = server
        .get("/api/notes?isPinned=true&relatedDate=2025-03-02")
        .authorization_bearer(&token)
        .await;
    assert_eq!(only_pinned.json::<Value>()["data"].as_array().unwrap().len(), 1);

    let unpinned = server
        .patch(&format!("/api/notes/{}/pin", first_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(unpinned.json::<Value>()["message"], json!("Note unpinned"));
}
