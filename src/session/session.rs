use super::config::{SessionMode, StartRequest};
use super::status::{CallStatus, InvalidTransition, Trigger};
use chrono::{DateTime, Utc};

/// One live voice-interview attempt, from start to terminal state
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier (e.g., "session-<uuid>")
    pub id: String,

    pub mode: SessionMode,

    pub participant_name: String,

    pub participant_id: Option<String>,

    pub interview_id: Option<String>,

    pub status: CallStatus,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// When the session reached `Finished`
    pub ended_at: Option<DateTime<Utc>>,

    /// Whether the voice agent is currently speaking
    pub is_speaking: bool,
}

impl Session {
    /// New session in `Inactive`, before the start transition is applied
    pub fn new(request: &StartRequest) -> Self {
        Self {
            id: format!("session-{}", uuid::Uuid::new_v4()),
            mode: request.mode,
            participant_name: request.participant_name.clone(),
            participant_id: request.participant_id.clone(),
            interview_id: request.interview_id.clone(),
            status: CallStatus::Inactive,
            started_at: Utc::now(),
            ended_at: None,
            is_speaking: false,
        }
    }

    /// Apply `trigger`, leaving the session untouched when it is rejected
    pub fn apply(&mut self, trigger: Trigger) -> Result<CallStatus, InvalidTransition> {
        let next = self.status.transition(trigger)?;

        self.status = next;
        if next.is_terminal() {
            self.ended_at = Some(Utc::now());
        }
        if next.is_idle() {
            self.is_speaking = false;
        }

        Ok(next)
    }
}
