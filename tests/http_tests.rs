// Integration tests for the HTTP control API
//
// Requests go straight through the router with `tower::ServiceExt::oneshot`;
// no socket is bound.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use debate_moderator::{create_router, AppState, UtteranceAnalyzer};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let analyzer = Arc::new(UtteranceAnalyzer::english().unwrap());
    create_router(AppState::with_tracing_sink(analyzer))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => request.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    Ok((status, value))
}

#[tokio::test]
async fn test_health_check() -> Result<()> {
    let (status, _) = send(&app(), Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_session_lifecycle() -> Result<()> {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/sessions",
        Some(json!({ "session_id": "room-1", "persona": "tough" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "room-1");
    assert_eq!(body["persona"]["id"], "tough");
    assert_eq!(body["persona"]["interruption_threshold_seconds"], 60.0);

    let (status, body) = send(
        &app,
        Method::POST,
        "/sessions/room-1/updates",
        Some(json!({ "transcript": "That's a good", "is_speaking": true })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalized"], false);

    send(
        &app,
        Method::POST,
        "/sessions/room-1/updates",
        Some(json!({ "transcript": "That's a good question.", "is_speaking": true })),
    )
    .await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/sessions/room-1/updates",
        Some(json!({ "transcript": "", "is_speaking": false })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalized"], true);
    assert_eq!(body["analysis"]["interruption_reason"], "off_topic");
    assert_eq!(
        body["interruption_message"],
        "You're going off-topic. Let's stay focused on the debate question."
    );

    let (status, body) = send(&app, Method::GET, "/sessions/room-1/history", None).await?;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().expect("history is an array");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["text"], "That's a good question.");

    let (status, body) = send(&app, Method::GET, "/sessions/room-1/status", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responses_count"], 1);
    assert_eq!(body["interruptions_count"], 1);
    assert_eq!(body["is_speaking"], false);

    let (status, body) = send(&app, Method::DELETE, "/sessions/room-1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ended");
    assert_eq!(body["stats"]["responses_count"], 1);

    let (status, _) = send(&app, Method::GET, "/sessions/room-1/status", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_session_conflicts() -> Result<()> {
    let app = app();
    let request = json!({ "session_id": "room-2" });

    let (status, _) = send(&app, Method::POST, "/sessions", Some(request.clone())).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/sessions", Some(request)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap_or_default().contains("room-2"));

    Ok(())
}

#[tokio::test]
async fn test_generated_session_id_and_unknown_persona() -> Result<()> {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/sessions", Some(json!({ "persona": "pirate" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["session_id"].as_str().unwrap_or_default().starts_with("session-"));
    assert_eq!(body["persona"]["id"], "standard");

    Ok(())
}

#[tokio::test]
async fn test_invalid_threshold_rejected() -> Result<()> {
    let (status, _) = send(
        &app(),
        Method::POST,
        "/sessions",
        Some(json!({ "persona": "friendly", "interruption_threshold_seconds": 0.0 })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_update_unknown_session() -> Result<()> {
    let (status, _) = send(
        &app(),
        Method::POST,
        "/sessions/missing/updates",
        Some(json!({ "transcript": "hello", "is_speaking": true })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_one_shot_analysis() -> Result<()> {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/analyze",
        Some(json!({ "text": "Um, like, so, um.", "duration_seconds": 4.0, "persona": "standard" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["filler_word_count"], 4);
    assert_eq!(body["analysis"]["interruption_reason"], "too_many_fillers");
    assert_eq!(
        body["interruption_message"],
        "I'm interrupting because you're using too many filler words."
    );

    let (_, body) = send(
        &app(),
        Method::POST,
        "/analyze",
        Some(json!({ "text": "We grew revenue by ten percent.", "duration_seconds": 4.0 })),
    )
    .await?;
    assert_eq!(body["analysis"]["should_interrupt"], false);
    assert_eq!(body["interruption_message"], Value::Null);

    Ok(())
}
