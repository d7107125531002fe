use super::events::{CallEvent, ProviderEvent};
use super::provider::{CallTarget, EventSubscription, VariableValues, VoiceProvider};
use crate::config::VoiceConfig;
use crate::error::ProviderError;
use crate::session::{SessionMode, StartRequest};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Provider-side flow identifiers
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Workflow started in `GenerateNew` mode
    pub workflow_id: String,

    /// Interviewer persona started in `ScriptedInterview` mode
    pub interviewer_ref: String,
}

impl From<&VoiceConfig> for BridgeConfig {
    fn from(voice: &VoiceConfig) -> Self {
        Self {
            workflow_id: voice.workflow_id.clone(),
            interviewer_ref: voice.interviewer_ref.clone(),
        }
    }
}

/// Adapts a [`VoiceProvider`] to the session controller: builds start
/// invocations per session mode and normalizes inbound events.
pub struct CallEventBridge {
    provider: Arc<dyn VoiceProvider>,
    config: BridgeConfig,
    call_active: AtomicBool,
}

impl CallEventBridge {
    pub fn new(provider: Arc<dyn VoiceProvider>, config: BridgeConfig) -> Self {
        Self {
            provider,
            config,
            call_active: AtomicBool::new(false),
        }
    }

    /// Register for provider events for the lifetime of the returned handle
    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription::acquire(Arc::clone(&self.provider))
    }

    /// Translate a raw provider event, tracking whether a call is live
    pub fn normalize(&self, event: ProviderEvent) -> CallEvent {
        match &event {
            ProviderEvent::CallStart => self.call_active.store(true, Ordering::SeqCst),
            ProviderEvent::CallEnd | ProviderEvent::Error { .. } => {
                self.call_active.store(false, Ordering::SeqCst)
            }
            _ => {}
        }
        CallEvent::from(event)
    }

    /// Target and variable bindings for a start request.
    ///
    /// Scripted questions are joined with newlines as-is; they must already be
    /// free of characters the voice agent cannot read aloud.
    pub fn start_parameters(&self, request: &StartRequest) -> (CallTarget, VariableValues) {
        let mut variables = VariableValues::new();
        variables.insert("username".to_string(), request.participant_name.clone());

        match request.mode {
            SessionMode::GenerateNew => {
                variables.insert(
                    "userid".to_string(),
                    request.participant_id.clone().unwrap_or_default(),
                );
                (CallTarget::Workflow(self.config.workflow_id.clone()), variables)
            }
            SessionMode::ScriptedInterview => {
                variables.insert("questions".to_string(), request.questions.join("\n"));
                (
                    CallTarget::Assistant(self.config.interviewer_ref.clone()),
                    variables,
                )
            }
        }
    }

    pub async fn start(&self, request: &StartRequest) -> Result<(), ProviderError> {
        let (target, variables) = self.start_parameters(request);

        info!(
            "Starting {} call via {} ({:?})",
            request.mode,
            self.provider.name(),
            target
        );

        self.provider.start(&target, &variables).await?;
        self.call_active.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Stop the current call. Does nothing when no call is active.
    pub async fn stop(&self) -> Result<(), ProviderError> {
        if !self.call_active.load(Ordering::SeqCst) {
            debug!("No active call to stop");
            return Ok(());
        }

        self.provider.stop().await?;
        self.call_active.store(false, Ordering::SeqCst);
        info!("Call stopped via {}", self.provider.name());
        Ok(())
    }

    pub fn is_call_active(&self) -> bool {
        self.call_active.load(Ordering::SeqCst)
    }
}
