use super::events::ProviderEvent;
use super::provider::{CallTarget, EventListeners, SubscriptionId, VariableValues, VoiceProvider};
use crate::error::ProviderError;
use anyhow::{Context, Result};
use async_nats::Client;
use futures::stream::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Command published to the voice relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum VoiceCommand {
    Start {
        target: CallTarget,
        #[serde(rename = "variableValues")]
        variable_values: VariableValues,
    },
    Stop,
}

/// Voice provider reached through a NATS relay.
///
/// Commands go to `{prefix}.control.{session}`; provider events arrive as JSON
/// [`ProviderEvent`]s on `{prefix}.event.{session}`.
pub struct NatsVoiceProvider {
    client: Client,
    control_subject: String,
    listeners: Arc<EventListeners>,
    event_task: JoinHandle<()>,
}

impl NatsVoiceProvider {
    /// Connect to NATS server and start relaying events for `session_id`
    pub async fn connect(url: &str, subject_prefix: &str, session_id: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        let event_subject = format!("{}.event.{}", subject_prefix, session_id);
        let mut subscriber = client
            .subscribe(event_subject.clone())
            .await
            .context("Failed to subscribe to voice events")?;

        info!("Subscribed to {}", event_subject);

        let listeners = Arc::new(EventListeners::new());
        let relay = Arc::clone(&listeners);

        let event_task = tokio::spawn(async move {
            while let Some(msg) = subscriber.next().await {
                match serde_json::from_slice::<ProviderEvent>(&msg.payload) {
                    Ok(event) => relay.emit(&event),
                    Err(e) => warn!("Failed to parse voice event: {}", e),
                }
            }
            info!("Voice event relay stopped");
        });

        Ok(Self {
            client,
            control_subject: format!("{}.control.{}", subject_prefix, session_id),
            listeners,
            event_task,
        })
    }

    async fn publish(&self, command: &VoiceCommand) -> Result<(), ProviderError> {
        let payload =
            serde_json::to_vec(command).map_err(|e| ProviderError::Transport(e.to_string()))?;

        self.client
            .publish(self.control_subject.clone(), payload.into())
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        info!("Published voice command to {}", self.control_subject);
        Ok(())
    }
}

#[async_trait::async_trait]
impl VoiceProvider for NatsVoiceProvider {
    async fn start(
        &self,
        target: &CallTarget,
        variables: &VariableValues,
    ) -> Result<(), ProviderError> {
        self.publish(&VoiceCommand::Start {
            target: target.clone(),
            variable_values: variables.clone(),
        })
        .await
        .map_err(|e| {
            error!("Failed to start call: {}", e);
            ProviderError::Start(e.to_string())
        })
    }

    async fn stop(&self) -> Result<(), ProviderError> {
        self.publish(&VoiceCommand::Stop)
            .await
            .map_err(|e| ProviderError::Stop(e.to_string()))
    }

    fn on(&self) -> (SubscriptionId, mpsc::UnboundedReceiver<ProviderEvent>) {
        self.listeners.register()
    }

    fn off(&self, id: SubscriptionId) {
        self.listeners.remove(id);
    }

    fn name(&self) -> &str {
        "nats"
    }
}

impl Drop for NatsVoiceProvider {
    fn drop(&mut self) {
        self.event_task.abort();
    }
}
