use super::report::FeedbackReport;
use crate::error::FeedbackError;
use crate::transcript::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate-feedback`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub interview_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl FeedbackRequest {
    /// Returns `(interview_id, user_id)` when the transcript is non-empty and both ids are set
    pub fn validate(&self) -> Result<(&str, &str), FeedbackError> {
        require_inputs(
            &self.messages,
            self.interview_id.as_deref(),
            self.user_id.as_deref(),
        )
    }
}

pub(crate) fn require_inputs<'a>(
    messages: &[ChatMessage],
    interview_id: Option<&'a str>,
    user_id: Option<&'a str>,
) -> Result<(&'a str, &'a str), FeedbackError> {
    if messages.is_empty() {
        return Err(FeedbackError::Precondition("transcript is empty".to_string()));
    }
    let interview_id = interview_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| FeedbackError::Precondition("interview id is missing".to_string()))?;
    let user_id = user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| FeedbackError::Precondition("user id is missing".to_string()))?;
    Ok((interview_id, user_id))
}

/// Saved feedback record id and its report
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackReceipt {
    pub id: String,
    pub feedback: FeedbackReport,
}

/// Response of `POST /api/generate-feedback`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedbackResponse {
    pub fn success(receipt: FeedbackReceipt) -> Self {
        Self {
            success: true,
            id: Some(receipt.id),
            feedback: Some(receipt.feedback),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            feedback: None,
            error: Some(error.into()),
        }
    }
}

/// Turns a finished transcript into a saved feedback report
///
/// Implementations:
/// - `FeedbackPipeline`: synthesis and persistence in-process
/// - `HttpFeedbackClient`: the feedback endpoint over HTTP
#[async_trait]
pub trait FeedbackGateway: Send + Sync {
    async fn generate_feedback(
        &self,
        request: FeedbackRequest,
    ) -> Result<FeedbackReceipt, FeedbackError>;
}
