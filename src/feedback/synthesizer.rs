use super::gateway::require_inputs;
use super::llm::LanguageModel;
use super::prompt::build_prompt;
use super::report::FeedbackReport;
use crate::error::FeedbackError;
use crate::transcript::ChatMessage;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Evaluates a transcript with a language model
#[derive(Clone)]
pub struct FeedbackSynthesizer {
    model: Arc<dyn LanguageModel>,
}

impl FeedbackSynthesizer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Produce a report for `messages`.
    ///
    /// Fails without calling the model when the transcript is empty or either
    /// id is missing. Unusable model output yields [`FeedbackReport::fallback`];
    /// only a failed model call is an error.
    pub async fn synthesize(
        &self,
        messages: &[ChatMessage],
        interview_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<FeedbackReport, FeedbackError> {
        let (interview_id, _) = require_inputs(messages, interview_id, user_id).map_err(|e| {
            warn!("Not generating feedback: {}", e);
            e
        })?;

        info!(
            "Generating feedback for interview {} from {} messages",
            interview_id,
            messages.len()
        );

        let prompt = build_prompt(messages);
        let raw = self.model.generate_text(&prompt).await.map_err(|e| {
            error!("Language model call failed: {}", e);
            FeedbackError::Synthesis(e.to_string())
        })?;

        Ok(FeedbackReport::from_model_output(&raw))
    }
}
