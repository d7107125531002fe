use super::gateway::{FeedbackGateway, FeedbackReceipt, FeedbackRequest, FeedbackResponse};
use crate::error::FeedbackError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

/// Calls the feedback endpoint of a running `serve` instance
#[derive(Clone)]
pub struct HttpFeedbackClient {
    client: Client,
    endpoint: String,
}

impl HttpFeedbackClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeedbackGateway for HttpFeedbackClient {
    async fn generate_feedback(
        &self,
        request: FeedbackRequest,
    ) -> Result<FeedbackReceipt, FeedbackError> {
        request.validate()?;

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Feedback request to {} failed: {}", self.endpoint, e);
                FeedbackError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.json::<FeedbackResponse>().await.unwrap_or_else(|e| {
            error!("Unreadable feedback response (HTTP {}): {}", status, e);
            FeedbackResponse::failure(format!("HTTP error! status: {}", status))
        });

        if !status.is_success() || !body.success {
            let reason = body
                .error
                .unwrap_or_else(|| format!("HTTP error! status: {}", status));
            error!("Feedback endpoint rejected request: {}", reason);
            return Err(FeedbackError::Transport(reason));
        }

        match (body.id, body.feedback) {
            (Some(id), Some(feedback)) => Ok(FeedbackReceipt { id, feedback }),
            _ => Err(FeedbackError::Transport(
                "Failed to generate feedback".to_string(),
            )),
        }
    }
}
