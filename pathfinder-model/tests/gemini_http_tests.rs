//! `GeminiModel` against a local stand-in for the Gemini API.

use axum::http::{HeaderMap, StatusCode, Uri};
use axum::{Json, Router};
use pathfinder_model::{GeminiModel, ModelError, TextGenerator};
use serde_json::{Value, json};

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

fn service_message(err: ModelError) -> String {
    match err {
        ModelError::GenerationService { message, .. } => message,
        other => panic!("expected GenerationService, got {other:?}"),
    }
}

#[tokio::test]
async fn successful_call_returns_candidate_text() {
    let router = Router::new().fallback(|uri: Uri, headers: HeaderMap, Json(body): Json<Value>| async move {
        let authorized = headers.get("x-goog-api-key").is_some_and(|v| v == "test-key");
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default().to_string();
        if !authorized || !uri.path().ends_with("/models/gemini-test:generateContent") {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": {"message": "wrong request"}})));
        }
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{"content": {"parts": [{"text": format!("echo: {prompt}")}]}}],
                "modelVersion": "gemini-test-001"
            })),
        )
    });
    let base = spawn_stub(router).await;
    let model = GeminiModel::new("test-key").unwrap().with_model("gemini-test").with_base_url(base);

    assert_eq!(model.generate("hello").await.unwrap(), "echo: hello");
}

#[tokio::test]
async fn non_success_status_is_a_service_error() {
    let router = Router::new().fallback(|| async {
        (StatusCode::TOO_MANY_REQUESTS, Json(json!({"error": {"message": "Resource exhausted"}})))
    });
    let base = spawn_stub(router).await;
    let model = GeminiModel::new("test-key").unwrap().with_base_url(base);

    let message = service_message(model.generate("hello").await.unwrap_err());
    assert!(message.contains("429"));
    assert!(message.contains("Resource exhausted"));
}

#[tokio::test]
async fn undecodable_body_is_a_service_error() {
    let router = Router::new().fallback(|| async { (StatusCode::OK, "<html>proxy login</html>") });
    let base = spawn_stub(router).await;
    let model = GeminiModel::new("test-key").unwrap().with_base_url(base);

    let message = service_message(model.generate("hello").await.unwrap_err());
    assert!(message.contains("failed to parse response"));
}

#[tokio::test]
async fn unreachable_service_is_a_service_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let model = GeminiModel::new("test-key").unwrap().with_base_url(format!("http://{addr}"));

    let message = service_message(model.generate("hello").await.unwrap_err());
    assert!(message.contains("request failed"));
}
