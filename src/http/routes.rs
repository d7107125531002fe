use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Feedback generation
        .route("/api/generate-feedback", post(handlers::generate_feedback))
        // Interview queries
        .route("/interviews/:interview_id", get(handlers::get_interview))
        .route(
            "/interviews/:interview_id/feedback",
            get(handlers::get_interview_feedback),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
