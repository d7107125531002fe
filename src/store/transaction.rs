use super::document::DocumentStore;
use super::records::FeedbackRecord;
use crate::error::FeedbackError;
use crate::feedback::FeedbackReport;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Writes a feedback record and links it to its interview atomically.
///
/// Not idempotent: recording twice for one interview creates two feedback
/// records and the interview ends up linked to the second.
#[derive(Clone)]
pub struct PersistenceTransactionManager {
    store: Arc<dyn DocumentStore>,
}

impl PersistenceTransactionManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Returns the new feedback record id
    pub async fn record_feedback(
        &self,
        interview_id: &str,
        feedback: &FeedbackReport,
        user_id: &str,
    ) -> Result<String, FeedbackError> {
        let mut tx = self.store.begin().await?;

        if tx.get_interview(interview_id).await?.is_none() {
            warn!("Interview {} not found; discarding feedback", interview_id);
            return Err(FeedbackError::NotFound {
                interview_id: interview_id.to_string(),
            });
        }

        let now = Utc::now();
        let feedback_id = uuid::Uuid::new_v4().to_string();

        tx.create_feedback(FeedbackRecord {
            id: feedback_id.clone(),
            interview_id: interview_id.to_string(),
            user_id: user_id.to_string(),
            feedback: feedback.clone(),
            created_at: now,
        });
        tx.link_feedback(interview_id, &feedback_id, now);
        tx.commit().await?;

        info!("Saved feedback {} for interview {}", feedback_id, interview_id);
        Ok(feedback_id)
    }
}
