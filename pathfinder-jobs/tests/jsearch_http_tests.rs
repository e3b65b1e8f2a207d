//! `JSearchClient` against a local stand-in for the JSearch API.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::{Json, Router};
use pathfinder_jobs::{JSearchClient, JobQuery, JobSearch, JobSearchError, UNKNOWN_EMPLOYER};
use serde_json::json;

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}/search")
}

#[tokio::test]
async fn sends_credentials_and_query_and_validates_records() {
    let router = Router::new().fallback(
        |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
            let key_ok = headers.get("X-RapidAPI-Key").is_some_and(|v| v == "rapid-key");
            let host_ok =
                headers.get("X-RapidAPI-Host").is_some_and(|v| v == "jsearch.p.rapidapi.com");
            if !key_ok || !host_ok {
                return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad credentials"})));
            }
            let paging = (params.get("page"), params.get("num_pages"));
            if paging != (Some(&"1".to_string()), Some(&"1".to_string())) {
                return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad paging"})));
            }
            let query = params.get("query").cloned().unwrap_or_default();
            (
                StatusCode::OK,
                Json(json!({
                    "status": "OK",
                    "data": [
                        {"job_title": format!("Match for {query}"), "job_city": "Austin", "job_state": "TX"},
                        {"job_title": null, "employer_name": null}
                    ]
                })),
            )
        },
    );
    let url = spawn_stub(router).await;
    let client = JSearchClient::new("rapid-key").with_url(url);

    let listings =
        client.search(&JobQuery::for_goal("Data Scientist", Some("Austin, TX"))).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Match for Data Scientist in Austin, TX");
    assert_eq!(listings[0].employer, UNKNOWN_EMPLOYER);
    assert_eq!(listings[0].location().as_deref(), Some("Austin, TX"));
}

#[tokio::test]
async fn non_success_status_keeps_code_and_body() {
    let router = Router::new()
        .fallback(|| async { (StatusCode::FORBIDDEN, "You are not subscribed to this API.") });
    let client = JSearchClient::new("rapid-key").with_url(spawn_stub(router).await);

    let err = client.search(&JobQuery::for_goal("Nurse", None)).await.unwrap_err();
    match err {
        JobSearchError::Status { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("not subscribed"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = Router::new().fallback(|| async { (StatusCode::OK, "{\"data\": [") });
    let client = JSearchClient::new("rapid-key").with_url(spawn_stub(router).await);

    let err = client.search(&JobQuery::for_goal("Nurse", None)).await.unwrap_err();
    assert!(matches!(err, JobSearchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = JSearchClient::new("rapid-key").with_url(format!("http://{addr}/search"));

    let err = client.search(&JobQuery::for_goal("Nurse", None)).await.unwrap_err();
    assert!(matches!(err, JobSearchError::Request(_)));
}
