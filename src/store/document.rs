use super::records::{FeedbackRecord, InterviewRecord};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Document store holding interviews and feedback
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open a read-modify-write transaction. Writes become visible together
    /// on [`StoreTransaction::commit`]; dropping the transaction discards them.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError>;

    async fn get_interview(&self, id: &str) -> Result<Option<InterviewRecord>, StoreError>;

    /// Feedback records for an interview, oldest first
    async fn feedback_for_interview(
        &self,
        interview_id: &str,
    ) -> Result<Vec<FeedbackRecord>, StoreError>;
}

#[async_trait]
pub trait StoreTransaction: Send {
    async fn get_interview(&mut self, id: &str) -> Result<Option<InterviewRecord>, StoreError>;

    /// Stage a new feedback record
    fn create_feedback(&mut self, record: FeedbackRecord);

    /// Stage `hasFeedback = true` and the feedback link on an interview
    fn link_feedback(&mut self, interview_id: &str, feedback_id: &str, updated_at: DateTime<Utc>);

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
