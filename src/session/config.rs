use serde::{Deserialize, Serialize};
use std::fmt;

/// Which conversational flow a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    /// Open-ended workflow that produces a new interview; no feedback
    GenerateNew,

    /// Fixed interviewer persona asking a prepared question list
    ScriptedInterview,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::GenerateNew => f.write_str("generate-new"),
            SessionMode::ScriptedInterview => f.write_str("scripted-interview"),
        }
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    pub mode: SessionMode,

    /// Display name passed to the voice agent
    pub participant_name: String,

    /// Authenticated user id; required in every mode
    pub participant_id: Option<String>,

    /// Interview being taken; required in `ScriptedInterview` mode
    pub interview_id: Option<String>,

    /// Prepared questions; must not contain `/` or `*`
    #[serde(default)]
    pub questions: Vec<String>,
}

impl StartRequest {
    pub fn generate_new(participant_name: impl Into<String>, participant_id: impl Into<String>) -> Self {
        Self {
            mode: SessionMode::GenerateNew,
            participant_name: participant_name.into(),
            participant_id: Some(participant_id.into()),
            interview_id: None,
            questions: Vec::new(),
        }
    }

    pub fn scripted(
        participant_name: impl Into<String>,
        participant_id: impl Into<String>,
        interview_id: impl Into<String>,
        questions: Vec<String>,
    ) -> Self {
        Self {
            mode: SessionMode::ScriptedInterview,
            participant_name: participant_name.into(),
            participant_id: Some(participant_id.into()),
            interview_id: Some(interview_id.into()),
            questions,
        }
    }

    /// Check required identifiers for the requested mode
    pub fn validate(&self) -> Result<(), String> {
        if !is_present(&self.participant_id) {
            return Err("participant id is required".to_string());
        }
        if self.mode == SessionMode::ScriptedInterview && !is_present(&self.interview_id) {
            return Err("interview id is required for a scripted interview".to_string());
        }
        Ok(())
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
