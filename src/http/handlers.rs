use super::state::AppState;
use crate::error::FeedbackError;
use crate::feedback::{FeedbackRequest, FeedbackResponse};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn status_for(error: &FeedbackError) -> StatusCode {
    match error {
        FeedbackError::Precondition(_) => StatusCode::BAD_REQUEST,
        FeedbackError::NotFound { .. } => StatusCode::NOT_FOUND,
        FeedbackError::Synthesis(_) | FeedbackError::Transport(_) => StatusCode::BAD_GATEWAY,
        FeedbackError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/generate-feedback
/// Evaluate a finished interview transcript and save the report
pub async fn generate_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Some(gateway) = state.feedback.clone() else {
        error!("Missing language model API key");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FeedbackResponse::failure("Server configuration error")),
        )
            .into_response();
    };

    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("Rejected feedback request body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(FeedbackResponse::failure("Missing required fields")),
            )
                .into_response();
        }
    };

    info!(
        "Feedback requested for interview {:?} ({} messages)",
        req.interview_id,
        req.messages.len()
    );

    match gateway.generate_feedback(req).await {
        Ok(receipt) => (StatusCode::OK, Json(FeedbackResponse::success(receipt))).into_response(),
        Err(e) => {
            error!("Feedback generation failed: {}", e);
            (
                status_for(&e),
                Json(FeedbackResponse::failure(e.public_message())),
            )
                .into_response()
        }
    }
}

/// GET /interviews/:interview_id
pub async fn get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_interview(&interview_id).await {
        Ok(Some(interview)) => (StatusCode::OK, Json(interview)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Interview not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to fetch interview {}: {}", interview_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch interview".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /interviews/:interview_id/feedback
/// All feedback records for an interview, oldest first
pub async fn get_interview_feedback(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> impl IntoResponse {
    match state.store.feedback_for_interview(&interview_id).await {
        Ok(feedback) => (StatusCode::OK, Json(feedback)).into_response(),
        Err(e) => {
            error!("Failed to fetch feedback for {}: {}", interview_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch feedback".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
