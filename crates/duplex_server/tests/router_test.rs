//! Tests for the HTTP surface of the router.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use duplex_server::{Notifier, SessionHandle, router};
use duplex_tictactoe::ParticipantId;
use serde_json::Value;
use tower::ServiceExt;

async fn health_body(session: SessionHandle) -> Value {
    let response = router(session)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_empty_session() {
    let body = health_body(SessionHandle::new()).await;

    assert_eq!(body["phase"], "empty");
    assert_eq!(body["moves"], 0);
    assert!(body["occupied"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_tracks_waiting_participant() {
    let session = SessionHandle::new();
    let (notifier, _rx) = Notifier::channel();
    session.register(ParticipantId::Second, &notifier).unwrap();

    let body = health_body(session).await;

    assert_eq!(body["phase"], "awaiting_second_player");
    assert_eq!(body["occupied"], serde_json::json!(["second"]));
}

#[tokio::test]
async fn test_plain_get_on_ws_is_not_upgraded() {
    let response = router(SessionHandle::new())
        .oneshot(Request::get("/ws").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
