mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{seeded_store, CannedModel, INTERVIEW_ID, USER_ID, VALID_FEEDBACK};
use loqa_interviews::feedback::FeedbackResponse;
use loqa_interviews::store::FeedbackRecord;
use loqa_interviews::{
    create_router, AppState, DocumentStore, FeedbackGateway, FeedbackPipeline, InMemoryStore,
    InterviewRecord,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(store: &InMemoryStore, reply: &str) -> Router {
    let shared: Arc<dyn DocumentStore> = Arc::new(store.clone());
    let gateway: Arc<dyn FeedbackGateway> = Arc::new(FeedbackPipeline::new(
        CannedModel::replying(reply),
        Arc::clone(&shared),
    ));
    create_router(AppState::new(shared, Some(gateway)))
}

fn feedback_body(interview_id: Option<&str>, user_id: Option<&str>) -> Value {
    json!({
        "messages": [
            {"role": "user", "content": "Tell me about yourself"},
            {"role": "assistant", "content": "Sure..."},
        ],
        "interviewId": interview_id,
        "userId": user_id,
    })
}

async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_generate_feedback_success() {
    let store = seeded_store().await;
    let body = feedback_body(Some(INTERVIEW_ID), Some(USER_ID));

    let (status, bytes) = post_json(app(&store, VALID_FEEDBACK), "/api/generate-feedback", &body).await;

    assert_eq!(status, StatusCode::OK);
    let response: FeedbackResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(response.success);
    assert!(response.error.is_none());
    let id = response.id.unwrap();
    assert_eq!(response.feedback.unwrap().overall.score, 7);

    let interview = store.get_interview(INTERVIEW_ID).await.unwrap().unwrap();
    assert!(interview.has_feedback);
    assert_eq!(interview.feedback_id, Some(id));
}

#[tokio::test]
async fn test_generate_feedback_falls_back_on_prose() {
    let store = seeded_store().await;
    let body = feedback_body(Some(INTERVIEW_ID), Some(USER_ID));

    let (status, bytes) = post_json(
        app(&store, "Sorry, I cannot evaluate this."),
        "/api/generate-feedback",
        &body,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: FeedbackResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(response.success);
    assert!(response.feedback.unwrap().is_fallback());
    assert_eq!(store.feedback_count().await, 1);
}

#[tokio::test]
async fn test_generate_feedback_missing_fields() {
    let store = seeded_store().await;

    for body in [
        feedback_body(None, Some(USER_ID)),
        feedback_body(Some(INTERVIEW_ID), None),
        json!({"messages": [], "interviewId": INTERVIEW_ID, "userId": USER_ID}),
        json!({}),
    ] {
        let (status, bytes) =
            post_json(app(&store, VALID_FEEDBACK), "/api/generate-feedback", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        let response: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(response["success"], json!(false));
        assert_eq!(response["error"], json!("Missing required fields"));
    }
    assert_eq!(store.feedback_count().await, 0);
}

#[tokio::test]
async fn test_generate_feedback_malformed_body() {
    let store = seeded_store().await;

    let bodies = [
        json!({
            "messages": [{"role": "tool", "content": "ls"}],
            "interviewId": INTERVIEW_ID,
            "userId": USER_ID,
        })
        .to_string(),
        json!({"messages": "not a list", "interviewId": INTERVIEW_ID, "userId": USER_ID})
            .to_string(),
        "{not json".to_string(),
    ];

    for body in bodies {
        let request = Request::builder()
            .method("POST")
            .uri("/api/generate-feedback")
            .header("content-type", "application/json")
            .body(Body::from(body.clone()))
            .unwrap();
        let response = app(&store, VALID_FEEDBACK).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let response: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            response,
            json!({"success": false, "error": "Missing required fields"})
        );
    }

    // Missing content type is rejected the same way
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate-feedback")
        .body(Body::from(
            feedback_body(Some(INTERVIEW_ID), Some(USER_ID)).to_string(),
        ))
        .unwrap();
    let response = app(&store, VALID_FEEDBACK).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(store.feedback_count().await, 0);
}

#[tokio::test]
async fn test_generate_feedback_unknown_interview() {
    let store = seeded_store().await;
    let body = feedback_body(Some("interview-missing"), Some(USER_ID));

    let (status, bytes) = post_json(app(&store, VALID_FEEDBACK), "/api/generate-feedback", &body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(response["error"], json!("Interview not found"));
    assert_eq!(store.feedback_count().await, 0);
}

#[tokio::test]
async fn test_generate_feedback_model_unreachable() {
    let store = seeded_store().await;
    let shared: Arc<dyn DocumentStore> = Arc::new(store.clone());
    let gateway: Arc<dyn FeedbackGateway> = Arc::new(FeedbackPipeline::new(
        CannedModel::unreachable(),
        Arc::clone(&shared),
    ));
    let app = create_router(AppState::new(shared, Some(gateway)));

    let body = feedback_body(Some(INTERVIEW_ID), Some(USER_ID));
    let (status, bytes) = post_json(app, "/api/generate-feedback", &body).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let response: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(response["error"], json!("Failed to generate feedback"));
    // Internal detail stays out of the response
    assert!(!String::from_utf8_lossy(&bytes).contains("connection refused"));
}

#[tokio::test]
async fn test_generate_feedback_without_model_configured() {
    let app = create_router(AppState::default());
    let body = feedback_body(Some(INTERVIEW_ID), Some(USER_ID));

    let (status, bytes) = post_json(app, "/api/generate-feedback", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let response: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(response["success"], json!(false));
    assert_eq!(response["error"], json!("Server configuration error"));
}

#[tokio::test]
async fn test_get_interview_and_feedback() {
    let store = seeded_store().await;
    let body = feedback_body(Some(INTERVIEW_ID), Some(USER_ID));
    let (status, _) = post_json(app(&store, VALID_FEEDBACK), "/api/generate-feedback", &body).await;
    assert_eq!(status, StatusCode::OK);

    let (status, bytes) = get(
        app(&store, VALID_FEEDBACK),
        &format!("/interviews/{}", INTERVIEW_ID),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let interview: InterviewRecord = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(interview.id, INTERVIEW_ID);
    assert!(interview.has_feedback);

    let (status, bytes) = get(
        app(&store, VALID_FEEDBACK),
        &format!("/interviews/{}/feedback", INTERVIEW_ID),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records: Vec<FeedbackRecord> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(interview.feedback_id.as_deref(), Some(records[0].id.as_str()));
}

#[tokio::test]
async fn test_get_unknown_interview() {
    let store = seeded_store().await;
    let (status, bytes) = get(app(&store, VALID_FEEDBACK), "/interviews/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(response["error"], json!("Interview not found"));
}

#[tokio::test]
async fn test_health_check() {
    let (status, bytes) = get(create_router(AppState::default()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"OK");
}
