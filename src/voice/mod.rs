//! Voice provider boundary
//!
//! This module adapts the external real-time voice service:
//! - `ProviderEvent` / `ProviderMessage`: typed provider event payloads
//! - `VoiceProvider`: injectable call capability (`start`, `stop`, `on`, `off`)
//! - `EventSubscription`: scoped listener registration
//! - `CallEventBridge`: start invocations per session mode and event normalization
//! - `NatsVoiceProvider`: provider relayed over NATS subjects

mod bridge;
mod events;
mod nats;
mod provider;

pub use bridge::{BridgeConfig, CallEventBridge};
pub use events::{CallEvent, MessageCategory, ProviderEvent, ProviderMessage};
pub use nats::{NatsVoiceProvider, VoiceCommand};
pub use provider::{
    CallTarget, EventListeners, EventSubscription, SubscriptionId, VariableValues, VoiceProvider,
};
