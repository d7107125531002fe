// Shared test doubles for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use loqa_interviews::error::ProviderError;
use loqa_interviews::feedback::{LanguageModel, LanguageModelError};
use loqa_interviews::store::InterviewRecord;
use loqa_interviews::voice::{
    BridgeConfig, CallTarget, EventListeners, ProviderEvent, ProviderMessage, SubscriptionId,
    VariableValues, VoiceProvider,
};
use loqa_interviews::{InMemoryStore, Role};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub const INTERVIEW_ID: &str = "interview-42";
pub const USER_ID: &str = "user-7";

pub const VALID_FEEDBACK: &str = r#"{
  "summary": "Candidate gave a concise introduction.",
  "technical": {"rating": 6, "strengths": ["Relevant experience"], "improvements": ["Give concrete examples"]},
  "communication": {"rating": 8, "strengths": ["Clear and polite"], "improvements": []},
  "overall": {"score": 7, "recommendations": ["Prepare project deep-dives"]}
}"#;

/// In-process voice provider; tests push events through `emit`
#[derive(Default)]
pub struct ScriptedVoiceProvider {
    pub listeners: EventListeners,
    pub starts: Mutex<Vec<(CallTarget, VariableValues)>>,
    pub stops: AtomicUsize,
    pub fail_start: AtomicBool,
}

impl ScriptedVoiceProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let provider = Self::default();
        provider.fail_start.store(true, Ordering::SeqCst);
        Arc::new(provider)
    }

    pub fn emit(&self, event: ProviderEvent) {
        self.listeners.emit(&event);
    }

    pub fn say(&self, role: Role, text: &str) {
        self.emit(transcript(role, text, "partial"));
        self.emit(transcript(role, text, "final"));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn start_calls(&self) -> Vec<(CallTarget, VariableValues)> {
        self.starts.lock().unwrap().clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoiceProvider for ScriptedVoiceProvider {
    async fn start(
        &self,
        target: &CallTarget,
        variables: &VariableValues,
    ) -> Result<(), ProviderError> {
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(ProviderError::Start("microphone permission denied".to_string()));
        }
        self.starts
            .lock()
            .unwrap()
            .push((target.clone(), variables.clone()));
        Ok(())
    }

    async fn stop(&self) -> Result<(), ProviderError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<ProviderEvent>) {
        self.listeners.register()
    }

    fn off(&self, id: SubscriptionId) {
        self.listeners.remove(id);
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn transcript(role: Role, text: &str, finality: &str) -> ProviderEvent {
    let message: ProviderMessage = serde_json::from_value(serde_json::json!({
        "type": "transcript",
        "role": role,
        "transcriptType": finality,
        "transcript": text,
    }))
    .unwrap();
    ProviderEvent::Message { message }
}

pub fn bridge_config() -> BridgeConfig {
    BridgeConfig {
        workflow_id: "workflow-generate".to_string(),
        interviewer_ref: "interviewer-persona".to_string(),
    }
}

/// Language model returning a fixed reply and counting calls
pub struct CannedModel {
    reply: Result<String, String>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            reply: Err("connection refused".to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for CannedModel {
    async fn generate_text(&self, prompt: &str) -> Result<String, LanguageModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(LanguageModelError::Request)
    }
}

pub async fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store
        .insert_interview(InterviewRecord::new(
            INTERVIEW_ID,
            USER_ID,
            vec![
                "Tell me about yourself".to_string(),
                "Describe a project you are proud of".to_string(),
            ],
        ))
        .await;
    store
}
