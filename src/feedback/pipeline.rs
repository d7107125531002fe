use super::gateway::{FeedbackGateway, FeedbackReceipt, FeedbackRequest};
use super::llm::LanguageModel;
use super::synthesizer::FeedbackSynthesizer;
use crate::error::FeedbackError;
use crate::store::{DocumentStore, PersistenceTransactionManager};
use async_trait::async_trait;
use std::sync::Arc;

/// Synthesis followed by the persistence transaction, in-process
#[derive(Clone)]
pub struct FeedbackPipeline {
    synthesizer: FeedbackSynthesizer,
    transactions: PersistenceTransactionManager,
}

impl FeedbackPipeline {
    pub fn new(model: Arc<dyn LanguageModel>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            synthesizer: FeedbackSynthesizer::new(model),
            transactions: PersistenceTransactionManager::new(store),
        }
    }
}

#[async_trait]
impl FeedbackGateway for FeedbackPipeline {
    async fn generate_feedback(
        &self,
        request: FeedbackRequest,
    ) -> Result<FeedbackReceipt, FeedbackError> {
        let feedback = self
            .synthesizer
            .synthesize(
                &request.messages,
                request.interview_id.as_deref(),
                request.user_id.as_deref(),
            )
            .await?;

        let (interview_id, user_id) = request.validate()?;
        let id = self
            .transactions
            .record_feedback(interview_id, &feedback, user_id)
            .await?;

        Ok(FeedbackReceipt { id, feedback })
    }
}
