use super::config::SessionMode;
use super::status::CallStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a session's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Current call status
    pub status: CallStatus,

    /// Session mode, if a session exists
    pub mode: Option<SessionMode>,

    /// Whether the voice agent is speaking
    pub is_speaking: bool,

    /// When the session started
    pub started_at: Option<DateTime<Utc>>,

    /// When the session finished
    pub ended_at: Option<DateTime<Utc>>,

    /// Duration in seconds, up to now or to `ended_at`
    pub duration_secs: f64,

    /// Number of finalized transcript messages
    pub transcript_messages: usize,
}
