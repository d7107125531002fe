use crate::transcript::{Finality, Role, TranscriptFragment};
use serde::{Deserialize, Serialize};

/// Event published by the voice provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ProviderEvent {
    CallStart,
    CallEnd,
    SpeakingStart,
    SpeakingEnd,
    Error { cause: String },
    Message { message: ProviderMessage },
}

/// Provider `message` payload, keyed by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProviderMessage {
    Transcript {
        role: Role,
        #[serde(rename = "transcriptType")]
        finality: Finality,
        transcript: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall", default)]
        function_call: serde_json::Value,
    },
    FunctionCallResult {
        #[serde(rename = "functionCallResult", default)]
        result: serde_json::Value,
    },
    AddMessage {
        #[serde(default)]
        message: serde_json::Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Transcript,
    FunctionCall,
    FunctionCallResult,
    AddMessage,
}

impl ProviderMessage {
    pub fn category(&self) -> MessageCategory {
        match self {
            ProviderMessage::Transcript { .. } => MessageCategory::Transcript,
            ProviderMessage::FunctionCall { .. } => MessageCategory::FunctionCall,
            ProviderMessage::FunctionCallResult { .. } => MessageCategory::FunctionCallResult,
            ProviderMessage::AddMessage { .. } => MessageCategory::AddMessage,
        }
    }
}

/// Provider event normalized into the session controller's vocabulary
#[derive(Debug, Clone, PartialEq)]
pub enum CallEvent {
    CallStarted,
    CallEnded,
    SpeakingStarted,
    SpeakingEnded,
    Transcript(TranscriptFragment),
    /// Non-transcript message; accepted but not persisted
    Auxiliary(MessageCategory),
    ProviderError(String),
}

impl From<ProviderEvent> for CallEvent {
    fn from(event: ProviderEvent) -> Self {
        match event {
            ProviderEvent::CallStart => CallEvent::CallStarted,
            ProviderEvent::CallEnd => CallEvent::CallEnded,
            ProviderEvent::SpeakingStart => CallEvent::SpeakingStarted,
            ProviderEvent::SpeakingEnd => CallEvent::SpeakingEnded,
            ProviderEvent::Error { cause } => CallEvent::ProviderError(cause),
            ProviderEvent::Message { message } => match message {
                ProviderMessage::Transcript {
                    role,
                    finality,
                    transcript,
                } => CallEvent::Transcript(TranscriptFragment {
                    role,
                    content: transcript,
                    finality,
                }),
                other => CallEvent::Auxiliary(other.category()),
            },
        }
    }
}
