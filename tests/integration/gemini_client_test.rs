//! `GeminiClient` against a mocked Gemini REST endpoint

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use planner::backend::ai::{AiError, AiService, GeminiClient, ModelError, PlannerModel, ResponseKind};
use planner::backend::server::{AiConfig, ServerConfig};

use crate::common::sample_reply;

const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn ai_config(base_url: &str, api_key: Option<&str>) -> AiConfig {
    let mut builder = ServerConfig::builder()
        .gemini_model("gemini-test")
        .gemini_base_url(base_url);
    if let Some(key) = api_key {
        builder = builder.gemini_api_key(key);
    }
    builder.build().unwrap().ai
}

fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_generate_sends_instruction_and_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "systemInstruction": {"parts": [{"text": "system rules"}]},
            "contents": [{"role": "user", "parts": [{"text": "rapat besok"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{\"ok\":true}")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&ai_config(&server.uri(), Some("test-key"))).unwrap();
    let text = client.generate("system rules", "rapat besok").await.unwrap();

    assert_eq!(text, "{\"ok\":true}");
    assert_eq!(client.model_name(), "gemini-test");
}

#[tokio::test]
async fn test_error_status_carries_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&ai_config(&server.uri(), Some("test-key"))).unwrap();
    let err = client.generate("system", "prompt").await.unwrap_err();

    assert_matches!(
        err,
        ModelError::Status { status: 429, ref body } if body == "Resource has been exhausted"
    );
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&ai_config(&server.uri(), Some("test-key"))).unwrap();

    assert_matches!(
        client.generate("system", "prompt").await,
        Err(ModelError::EmptyResponse)
    );
}

#[tokio::test]
async fn test_missing_api_key_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{}")))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&ai_config(&server.uri(), None)).unwrap();

    assert_matches!(
        client.generate("system", "prompt").await,
        Err(ModelError::MissingApiKey)
    );
}

#[tokio::test]
async fn test_service_over_http() {
    let server = MockServer::start().await;
    let fenced = format!("```json\n{}\n```", sample_reply());
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(&fenced)))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&ai_config(&server.uri(), Some("test-key"))).unwrap();
    let service = AiService::new(Arc::new(client));
    let user_id = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2025, 3, 2, 1, 0, 0).unwrap();

    let response = service.parse_at(now, "besok jam 9 rapat tim", user_id).await.unwrap();

    assert_eq!(response.kind, ResponseKind::Activity);
    assert_eq!(response.activities.len(), 1);
    assert_eq!(response.activities[0].user_id, user_id);
    assert_eq!(response.activities[0].draft.date, "2025-03-03");
    assert_eq!(response.notes[0].user_id, user_id);
}

#[tokio::test]
async fn test_service_maps_http_failure_to_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&ai_config(&server.uri(), Some("test-key"))).unwrap();
    let service = AiService::new(Arc::new(client));

    let err = service.parse("rapat besok", Uuid::new_v4()).await.unwrap_err();

    assert_matches!(err, AiError::Upstream(ModelError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "Gemini API error: [500] boom");
}
