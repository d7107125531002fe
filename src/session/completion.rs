use crate::feedback::{FeedbackGateway, FeedbackRequest};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// View the client should move to once a session completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Navigation {
    SessionList,
    FeedbackView { interview_id: String },
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::SessionList => "/interviews".to_string(),
            Navigation::FeedbackView { interview_id } => {
                format!("/interview-id/{}/feedback", interview_id)
            }
        }
    }
}

/// What to do with in-flight feedback work on teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownPolicy {
    Abort,
    Await,
}

/// Handle to the feedback generation spawned when a scripted session finishes
pub struct CompletionTask {
    interview_id: String,
    handle: JoinHandle<Option<String>>,
}

impl CompletionTask {
    /// Spawn feedback generation; navigates to the feedback view on success
    pub fn spawn(
        gateway: Arc<dyn FeedbackGateway>,
        request: FeedbackRequest,
        navigation: mpsc::UnboundedSender<Navigation>,
    ) -> Self {
        let interview_id = request.interview_id.clone().unwrap_or_default();
        let target = interview_id.clone();

        let handle = tokio::spawn(async move {
            info!("Generating feedback for interview: {}", target);

            match gateway.generate_feedback(request).await {
                Ok(receipt) => {
                    info!("Feedback {} saved for interview {}", receipt.id, target);
                    let _ = navigation.send(Navigation::FeedbackView {
                        interview_id: target,
                    });
                    Some(receipt.id)
                }
                Err(e) => {
                    error!("Failed to generate feedback: {}", e);
                    None
                }
            }
        });

        Self {
            interview_id,
            handle,
        }
    }

    pub fn interview_id(&self) -> &str {
        &self.interview_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn abort(&self) {
        if !self.handle.is_finished() {
            warn!("Aborting feedback generation for {}", self.interview_id);
            self.handle.abort();
        }
    }

    /// Wait for the task; returns the saved feedback id on success
    pub async fn join(self) -> Option<String> {
        match self.handle.await {
            Ok(feedback_id) => feedback_id,
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                error!("Feedback task panicked: {}", e);
                None
            }
        }
    }
}
