//! Error taxonomy shared across the session, bridge, feedback and store layers.
//!
//! Malformed model output has no variant here: it is recovered inside
//! [`crate::feedback`] and never reaches a caller.

use crate::session::InvalidTransition;
use thiserror::Error;

/// Failure reported by (or while talking to) the external voice provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("voice provider failed to start call: {0}")]
    Start(String),

    #[error("voice provider failed to stop call: {0}")]
    Stop(String),

    #[error("voice provider transport error: {0}")]
    Transport(String),

    #[error("voice provider reported an error: {0}")]
    Remote(String),
}

/// Failure of the backing document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of the feedback synthesis and persistence pipeline.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// Missing participant id, interview reference, or empty transcript.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The language model call itself failed.
    #[error("language model call failed: {0}")]
    Synthesis(String),

    #[error("interview {interview_id} not found")]
    NotFound { interview_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The feedback endpoint could not be reached or rejected the request.
    #[error("feedback endpoint error: {0}")]
    Transport(String),
}

impl FeedbackError {
    /// Message safe to show to an end user. Internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            FeedbackError::Precondition(_) => "Missing required fields",
            FeedbackError::NotFound { .. } => "Interview not found",
            FeedbackError::Store(_) => "Failed to save feedback",
            FeedbackError::Synthesis(_) | FeedbackError::Transport(_) => {
                "Failed to generate feedback"
            }
        }
    }
}

/// Failure of a session controller operation.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("cannot start session: {0}")]
    Precondition(String),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    #[error("previous session is still generating feedback")]
    CompletionPending,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
