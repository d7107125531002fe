use super::events::ProviderEvent;
use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::debug;

pub type SubscriptionId = u64;

/// Variable bindings passed to the provider-side flow
pub type VariableValues = BTreeMap<String, String>;

/// Provider-side configuration selecting which conversational flow to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CallTarget {
    /// Open-ended workflow that generates a new interview
    Workflow(String),
    /// Fixed interviewer persona running a scripted interview
    Assistant(String),
}

/// Voice call capability
///
/// Implementations:
/// - NATS: commands and events relayed over subjects (see `NatsVoiceProvider`)
/// - In-process test doubles
#[async_trait::async_trait]
pub trait VoiceProvider: Send + Sync {
    /// Start a call against `target` with the given variable bindings
    async fn start(&self, target: &CallTarget, variables: &VariableValues)
        -> Result<(), ProviderError>;

    /// Stop the current call
    async fn stop(&self) -> Result<(), ProviderError>;

    /// Register an event listener
    fn on(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<ProviderEvent>);

    /// Deregister a listener previously returned by [`VoiceProvider::on`]
    fn off(&self, id: SubscriptionId);

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Listener registry shared by provider implementations
#[derive(Debug, Default)]
pub struct EventListeners {
    next_id: AtomicU64,
    senders: Mutex<HashMap<SubscriptionId, mpsc::UnboundedSender<ProviderEvent>>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<ProviderEvent>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().insert(id, tx);
        (id, rx)
    }

    pub fn remove(&self, id: SubscriptionId) {
        self.lock().remove(&id);
    }

    /// Deliver `event` to every live listener, pruning closed ones
    pub fn emit(&self, event: &ProviderEvent) {
        self.lock()
            .retain(|_, tx| tx.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<SubscriptionId, mpsc::UnboundedSender<ProviderEvent>>>
    {
        // A poisoned registry still holds valid senders
        self.senders.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Listener registration that is deregistered exactly once, on
/// [`EventSubscription::dispose`] or drop, whichever comes first.
pub struct EventSubscription {
    provider: Arc<dyn VoiceProvider>,
    id: SubscriptionId,
    events: mpsc::UnboundedReceiver<ProviderEvent>,
    disposed: bool,
}

impl EventSubscription {
    pub fn acquire(provider: Arc<dyn VoiceProvider>) -> Self {
        let (id, events) = provider.on();
        debug!("Subscribed to {} events (listener {})", provider.name(), id);
        Self {
            provider,
            id,
            events,
            disposed: false,
        }
    }

    /// Next raw event, or `None` once disposed or the provider hung up
    pub async fn recv(&mut self) -> Option<ProviderEvent> {
        if self.disposed {
            return None;
        }
        self.events.recv().await
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.provider.off(self.id);
        self.events.close();
        debug!("Unsubscribed from {} events (listener {})", self.provider.name(), self.id);
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
