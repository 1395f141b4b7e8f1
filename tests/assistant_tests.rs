//! Assistant bridge against a local stand-in for the completion service.

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    routing::post,
};
use courtdesk::config::{AssistantConfig, Config};
use courtdesk::models::CaseContext;
use courtdesk::services::{Assistant, OpenAiAssistant};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn completions(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    captured.requests.lock().unwrap().push((auth, payload));

    Json(json!({
        "id": "chatcmpl-test",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "A writ is a formal order."}}
        ]
    }))
}

async fn failing_completions() -> (StatusCode, &'static str) {
    (StatusCode::TOO_MANY_REQUESTS, "rate limited")
}

async fn malformed_completions() -> &'static str {
    "not json"
}

async fn empty_completions() -> Json<Value> {
    Json(json!({"id": "chatcmpl-empty", "choices": []}))
}

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn assistant_config(base_url: String) -> AssistantConfig {
    AssistantConfig {
        api_key: Some("sk-test".to_string()),
        base_url,
        ..AssistantConfig::default()
    }
}

#[tokio::test]
async fn test_assistant_sends_context_and_returns_answer() {
    let captured = Captured::default();
    let base_url = spawn_stub(
        Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(captured.clone()),
    )
    .await;

    let assistant = OpenAiAssistant::new(&assistant_config(base_url)).unwrap();
    assert!(assistant.is_configured());

    let context: CaseContext = serde_json::from_value(json!({
        "case_title": "Sharma Enterprises vs Delhi Municipal Corporation",
        "case_number_full": "W.P.(C)/1234/2023",
        "case_status": "Pending"
    }))
    .unwrap();

    let answer = assistant
        .ask("What is a writ petition?", Some(&context))
        .await;
    assert_eq!(answer, "A writ is a formal order.");

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (auth, payload) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(payload["model"], "gpt-3.5-turbo");
    assert_eq!(payload["max_tokens"], 150);
    assert_eq!(payload["temperature"], 0.7);
    assert_eq!(payload["messages"][0]["role"], "system");
    assert_eq!(
        payload["messages"][0]["content"],
        "You are a legal assistant. Context: Case: Sharma Enterprises vs Delhi Municipal Corporation, Number: W.P.(C)/1234/2023, Status: Pending"
    );
    assert_eq!(payload["messages"][1]["role"], "user");
    assert_eq!(payload["messages"][1]["content"], "What is a writ petition?");
}

async fn answer_from(router: Router) -> String {
    let base_url = spawn_stub(router).await;
    let assistant = OpenAiAssistant::new(&assistant_config(base_url)).unwrap();
    assistant.ask("Anything?", None).await
}

#[tokio::test]
async fn test_assistant_falls_back_on_error_status() {
    let answer = answer_from(
        Router::new().route("/v1/chat/completions", post(failing_completions)),
    )
    .await;

    assert_eq!(
        answer,
        "I'm currently unable to connect to the AI service."
    );
}

#[tokio::test]
async fn test_assistant_falls_back_on_malformed_body() {
    let answer = answer_from(
        Router::new().route("/v1/chat/completions", post(malformed_completions)),
    )
    .await;

    assert_eq!(
        answer,
        "I'm currently unable to connect to the AI service."
    );
}

#[tokio::test]
async fn test_assistant_falls_back_on_empty_choices() {
    let answer = answer_from(
        Router::new().route("/v1/chat/completions", post(empty_completions)),
    )
    .await;

    assert_eq!(
        answer,
        "I'm currently unable to connect to the AI service."
    );
}

#[tokio::test]
async fn test_ask_ai_route_uses_configured_service() {
    let captured = Captured::default();
    let base_url = spawn_stub(
        Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(captured.clone()),
    )
    .await;

    let db_path = std::env::temp_dir().join(format!(
        "courtdesk-assistant-test-{}.db",
        uuid::Uuid::new_v4()
    ));
    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.assistant = assistant_config(base_url);

    let state = courtdesk::api::create_app_state_from_config(config, None)
        .await
        .unwrap();
    let app = courtdesk::api::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ask_ai")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"question": "Define writ"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["response"], "A writ is a formal order.");

    let requests = captured.requests.lock().unwrap();
    assert_eq!(
        requests[0].1["messages"][0]["content"],
        "You are a legal assistant. Answer legal questions."
    );
}
