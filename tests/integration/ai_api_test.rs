//! `POST /api/ai/parse` through the full router with a scripted model

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{access_token, sample_reply, test_server, ScriptedModel};

#[tokio::test]
async fn test_parse_success_stamps_drafts() {
    let model = ScriptedModel::text(sample_reply());
    let server = test_server(model.clone());
    let user_id = Uuid::new_v4();

    let response = server
        .post("/api/ai/parse")
        .authorization_bearer(access_token(user_id))
        .json(&json!({"prompt": "besok jam 9 rapat tim"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("AI response parsed successfully"));

    let data = &body["data"];
    assert_eq!(data["type"], json!("activity"));
    assert_eq!(data["warnings"], json!([]));
    assert_eq!(
        data["activities"][0],
        json!({
            "title": "Rapat tim",
            "description": null,
            "type": "schedule",
            "date": "2025-03-03",
            "startTime": "09:00",
            "endTime": "10:00",
            "priority": "high",
            "linkUrl": null,
            "status": "pending",
            "source": "ai",
            "userId": user_id.to_string()
        })
    );
    assert_eq!(data["notes"][0]["source"], json!("ai"));
    assert_eq!(data["notes"][0]["userId"], json!(user_id.to_string()));

    assert_eq!(model.prompts(), vec!["besok jam 9 rapat tim".to_string()]);
}

#[tokio::test]
async fn test_parse_overrides_spoofed_ownership() {
    let reply = json!({
        "type": "note",
        "message": "Catatan disimpan.",
        "warnings": [],
        "activities": [],
        "notes": [{
            "title": "Mood",
            "content": "Capek",
            "isPinned": true,
            "source": "manual",
            "userId": "00000000-0000-0000-0000-000000000000"
        }]
    });
    let server = test_server(ScriptedModel::text(reply.to_string()));
    let user_id = Uuid::new_v4();

    let response = server
        .post("/api/ai/parse")
        .authorization_bearer(access_token(user_id))
        .json(&json!({"prompt": "aku capek"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let note = &response.json::<Value>()["data"]["notes"][0];
    assert_eq!(note["source"], json!("ai"));
    assert_eq!(note["userId"], json!(user_id.to_string()));
    assert_eq!(note["isPinned"], json!(true));
}

#[tokio::test]
async fn test_parse_accepts_fenced_reply() {
    let fenced = format!("```json\n{}\n```", sample_reply());
    let server = test_server(ScriptedModel::text(fenced));

    let response = server
        .post("/api/ai/parse")
        .authorization_bearer(access_token(Uuid::new_v4()))
        .json(&json!({"prompt": "rapat besok"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_blank_prompt_never_reaches_model() {
    let model = ScriptedModel::text(sample_reply());
    let server = test_server(model.clone());
    let token = access_token(Uuid::new_v4());

    for body in [json!({"prompt": "   "}), json!({}), json!({"prompt": 42})] {
        let response = server
            .post("/api/ai/parse")
            .authorization_bearer(&token)
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
        assert_eq!(body["error"]["message"], json!("prompt is required"));
    }

    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn test_upstream_failure() {
    let server = test_server(ScriptedModel::failing(503, "model overloaded"));

    let response = server
        .post("/api/ai/parse")
        .authorization_bearer(access_token(Uuid::new_v4()))
        .json(&json!({"prompt": "rapat besok"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], json!("AI_ERROR"));
    assert_eq!(
        body["error"]["message"],
        json!("Gemini API error: [503] model overloaded")
    );
}

#[tokio::test]
async fn test_non_json_reply() {
    let server = test_server(ScriptedModel::text("Maaf, saya tidak mengerti."));

    let response = server
        .post("/api/ai/parse")
        .authorization_bearer(access_token(Uuid::new_v4()))
        .json(&json!({"prompt": "???"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], json!("AI_PARSE_ERROR"));
    assert_eq!(body["error"]["message"], json!("AI returned invalid JSON"));
}

#[tokio::test]
async fn test_schema_violation_names_the_path() {
    let reply = json!({
        "type": "activity",
        "message": "ok",
        "warnings": [],
        "activities": [{"title": "Gym", "type": "task", "date": "tomorrow"}],
        "notes": []
    });
    let server = test_server(ScriptedModel::text(reply.to_string()));

    let response = server
        .post("/api/ai/parse")
        .authorization_bearer(access_token(Uuid::new_v4()))
        .json(&json!({"prompt": "gym besok"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], json!("AI_SCHEMA_ERROR"));
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("AI response schema invalid: "), "{}", message);
    assert!(message.contains("activities[0].date"), "{}", message);

    // Every violation is reported in document order, joined with "; "
    let date_at = message.find("activities[0].date").unwrap();
    let status_at = message.find("; activities[0].status").unwrap();
    assert!(date_at < status_at, "{}", message);
}

#[tokio::test]
async fn test_parse_requires_token() {
    let model = ScriptedModel::text(sample_reply());
    let server = test_server(model.clone());

    let response = server
        .post("/api/ai/parse")
        .json(&json!({"prompt": "rapat besok"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(model.prompts().is_empty());
}
