use crate::feedback::FeedbackReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interview description; created elsewhere, read and updated here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub has_feedback: bool,
    #[serde(default)]
    pub feedback_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InterviewRecord {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            questions,
            has_feedback: false,
            feedback_id: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }
}

/// Persisted feedback report linked to its interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: String,
    pub interview_id: String,
    pub user_id: String,
    pub feedback: FeedbackReport,
    pub created_at: DateTime<Utc>,
}
