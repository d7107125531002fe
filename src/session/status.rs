use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Call lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    Inactive,
    Connecting,
    Active,
    Finished,
}

/// Input that may move a call between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Start,
    ProviderCallStart,
    ProviderCallEnd,
    ExplicitDisconnect,
    ProviderError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid transition from {from} on {trigger}")]
pub struct InvalidTransition {
    pub from: CallStatus,
    pub trigger: Trigger,
}

impl CallStatus {
    /// Next state for `trigger`.
    ///
    /// Valid moves: Inactive|Finished -> Connecting on start, Connecting ->
    /// Active on call start, Active -> Finished on call end or disconnect, and
    /// any state -> Inactive on provider error.
    pub fn transition(self, trigger: Trigger) -> Result<CallStatus, InvalidTransition> {
        use CallStatus::*;

        match (self, trigger) {
            (_, Trigger::ProviderError) => Ok(Inactive),
            (Inactive | Finished, Trigger::Start) => Ok(Connecting),
            (Connecting, Trigger::ProviderCallStart) => Ok(Active),
            (Active, Trigger::ProviderCallEnd | Trigger::ExplicitDisconnect) => Ok(Finished),
            (from, trigger) => Err(InvalidTransition { from, trigger }),
        }
    }

    pub fn is_terminal(self) -> bool {
        self == CallStatus::Finished
    }

    /// No call is being established or held
    pub fn is_idle(self) -> bool {
        matches!(self, CallStatus::Inactive | CallStatus::Finished)
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallStatus::Inactive => "INACTIVE",
            CallStatus::Connecting => "CONNECTING",
            CallStatus::Active => "ACTIVE",
            CallStatus::Finished => "FINISHED",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trigger::Start => "start",
            Trigger::ProviderCallStart => "call-start",
            Trigger::ProviderCallEnd => "call-end",
            Trigger::ExplicitDisconnect => "disconnect",
            Trigger::ProviderError => "error",
        };
        f.write_str(s)
    }
}
