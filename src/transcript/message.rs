use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a conversational turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a transcribed fragment is provisional or confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finality {
    Partial,
    Final,
}

/// A transcribed fragment as delivered by the voice provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFragment {
    pub role: Role,
    pub content: String,
    pub finality: Finality,
}

impl TranscriptFragment {
    pub fn partial(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            finality: Finality::Partial,
        }
    }

    pub fn final_(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            finality: Finality::Final,
        }
    }

    pub fn is_final(&self) -> bool {
        self.finality == Finality::Final
    }
}

/// A finalized turn in the session transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// Who spoke
    pub role: Role,

    /// Transcribed text
    pub content: String,

    /// Position in arrival order, starting at 0
    pub sequence: u64,
}

/// Role/content pair sent to the feedback endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&TranscriptMessage> for ChatMessage {
    fn from(message: &TranscriptMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}
