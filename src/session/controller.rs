use super::completion::{CompletionTask, Navigation, TeardownPolicy};
use super::config::{SessionMode, StartRequest};
use super::session::Session;
use super::stats::SessionStats;
use super::status::{CallStatus, Trigger};
use crate::error::ControllerError;
use crate::feedback::{FeedbackGateway, FeedbackRequest};
use crate::transcript::TranscriptAggregator;
use crate::voice::{CallEvent, CallEventBridge, EventSubscription};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// State machine driving one live call at a time.
///
/// All mutation happens on the caller's task through `&mut self`; only the
/// feedback generation spawned on `Finished` runs elsewhere, tracked by a
/// [`CompletionTask`].
pub struct SessionController {
    bridge: Arc<CallEventBridge>,
    feedback: Arc<dyn FeedbackGateway>,
    session: Option<Session>,
    transcript: TranscriptAggregator,
    subscription: Option<EventSubscription>,
    completion: Option<CompletionTask>,
    navigation: mpsc::UnboundedSender<Navigation>,
}

impl SessionController {
    /// Create a controller and the receiver its navigation signals go to
    pub fn new(
        bridge: Arc<CallEventBridge>,
        feedback: Arc<dyn FeedbackGateway>,
    ) -> (Self, mpsc::UnboundedReceiver<Navigation>) {
        let (navigation, navigation_rx) = mpsc::unbounded_channel();

        let controller = Self {
            bridge,
            feedback,
            session: None,
            transcript: TranscriptAggregator::new(),
            subscription: None,
            completion: None,
            navigation,
        };

        (controller, navigation_rx)
    }

    pub fn status(&self) -> CallStatus {
        self.session
            .as_ref()
            .map(|s| s.status)
            .unwrap_or(CallStatus::Inactive)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &TranscriptAggregator {
        &self.transcript
    }

    /// Whether feedback generation from the previous session is still running
    pub fn is_completion_pending(&self) -> bool {
        self.completion.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn stats(&self) -> SessionStats {
        let (mode, started_at, ended_at, is_speaking) = match &self.session {
            Some(s) => (Some(s.mode), Some(s.started_at), s.ended_at, s.is_speaking),
            None => (None, None, None, false),
        };

        let duration_secs = started_at
            .map(|start| {
                let end = ended_at.unwrap_or_else(Utc::now);
                end.signed_duration_since(start).num_milliseconds() as f64 / 1000.0
            })
            .unwrap_or(0.0);

        SessionStats {
            status: self.status(),
            mode,
            is_speaking,
            started_at,
            ended_at,
            duration_secs,
            transcript_messages: self.transcript.len(),
        }
    }

    /// Begin a new session and ask the provider to connect.
    ///
    /// Missing identifiers fail before any state changes. A provider failure
    /// leaves the new session `Inactive`.
    pub async fn start(&mut self, request: StartRequest) -> Result<(), ControllerError> {
        if let Some(task) = self.completion.as_ref().filter(|task| !task.is_finished()) {
            warn!(
                "Cannot start: feedback for interview {} still in progress",
                task.interview_id()
            );
            return Err(ControllerError::CompletionPending);
        }

        if let Err(reason) = request.validate() {
            warn!("Cannot start {} session: {}", request.mode, reason);
            return Err(ControllerError::Precondition(reason));
        }

        self.status().transition(Trigger::Start)?;

        self.completion = None;
        self.release_subscription();

        let mut session = Session::new(&request);
        session.apply(Trigger::Start)?;
        info!(
            "Starting {} session {} for {}",
            session.mode, session.id, session.participant_name
        );

        self.transcript = TranscriptAggregator::new();
        self.subscription = Some(self.bridge.subscribe());
        self.session = Some(session);

        if let Err(e) = self.bridge.start(&request).await {
            error!("Failed to start call: {}", e);
            self.apply(Trigger::ProviderError);
            return Err(e.into());
        }

        Ok(())
    }

    /// Next normalized event from the current subscription
    pub async fn next_event(&mut self) -> Option<CallEvent> {
        let subscription = self.subscription.as_mut()?;
        let event = subscription.recv().await?;
        Some(self.bridge.normalize(event))
    }

    /// Process events until the call is over or the provider hangs up
    pub async fn run(&mut self) {
        while let Some(event) = self.next_event().await {
            self.handle_event(event);
            if self.subscription.is_none() {
                break;
            }
        }
        debug!("Event loop finished in {}", self.status());
    }

    pub fn handle_event(&mut self, event: CallEvent) {
        if self.session.is_none() {
            debug!("Ignoring {:?}: no session", event);
            return;
        }

        match event {
            CallEvent::CallStarted => self.apply(Trigger::ProviderCallStart),
            CallEvent::CallEnded => self.apply(Trigger::ProviderCallEnd),
            CallEvent::SpeakingStarted => self.set_speaking(true),
            CallEvent::SpeakingEnded => self.set_speaking(false),
            CallEvent::Transcript(fragment) => {
                self.transcript.append(fragment);
            }
            CallEvent::Auxiliary(category) => {
                debug!("Ignoring {:?} message", category);
            }
            CallEvent::ProviderError(cause) => {
                error!("Voice provider error: {}", cause);
                self.apply(Trigger::ProviderError);
            }
        }
    }

    /// Hang up. Safe to call when no call is active.
    ///
    /// An active call finishes normally. A call still connecting is aborted
    /// back to `Inactive`, the same as a provider error.
    pub async fn disconnect(&mut self) -> Result<(), ControllerError> {
        if let Err(e) = self.bridge.stop().await {
            error!("Failed to disconnect: {}", e);
            return Err(e.into());
        }

        match self.status() {
            CallStatus::Active => self.apply(Trigger::ExplicitDisconnect),
            CallStatus::Connecting => {
                warn!("Call hung up before it connected");
                self.apply(Trigger::ProviderError);
            }
            CallStatus::Inactive | CallStatus::Finished => {}
        }
        Ok(())
    }

    /// Wait for pending feedback generation; returns the saved feedback id
    pub async fn await_completion(&mut self) -> Option<String> {
        let task = self.completion.take()?;
        task.join().await
    }

    /// Stop any call, release the subscription, and settle in-flight feedback work
    pub async fn shutdown(mut self, policy: TeardownPolicy) -> Option<String> {
        if let Err(e) = self.bridge.stop().await {
            warn!("Failed to stop call during shutdown: {}", e);
        }
        self.release_subscription();

        let task = self.completion.take()?;
        if policy == TeardownPolicy::Abort {
            task.abort();
        }
        task.join().await
    }

    fn apply(&mut self, trigger: Trigger) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let previous = session.status;
        match session.apply(trigger) {
            Ok(next) => {
                info!("Session {}: {} -> {} ({})", session.id, previous, next, trigger);
                match next {
                    CallStatus::Finished => self.on_finished(),
                    CallStatus::Inactive => self.release_subscription(),
                    CallStatus::Connecting | CallStatus::Active => {}
                }
            }
            Err(e) => debug!("Ignoring event: {}", e),
        }
    }

    fn set_speaking(&mut self, speaking: bool) {
        if let Some(session) = self.session.as_mut() {
            session.is_speaking = speaking;
        }
    }

    fn on_finished(&mut self) {
        self.release_subscription();

        let Some(session) = self.session.as_ref() else {
            return;
        };

        match session.mode {
            SessionMode::GenerateNew => {
                let _ = self.navigation.send(Navigation::SessionList);
            }
            SessionMode::ScriptedInterview => {
                let request = FeedbackRequest {
                    messages: self.transcript.to_chat_messages(),
                    interview_id: session.interview_id.clone(),
                    user_id: session.participant_id.clone(),
                };

                if let Err(e) = request.validate() {
                    warn!("Skipping feedback generation for {}: {}", session.id, e);
                    return;
                }

                self.completion = Some(CompletionTask::spawn(
                    Arc::clone(&self.feedback),
                    request,
                    self.navigation.clone(),
                ));
            }
        }
    }

    fn release_subscription(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.dispose();
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(task) = self.completion.take() {
            task.abort();
        }
    }
}
