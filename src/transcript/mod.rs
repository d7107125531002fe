//! Ordered log of finalized conversational turns
//!
//! Partial (provisional) fragments from the voice provider are dropped on
//! arrival; only final fragments become [`TranscriptMessage`]s.

mod aggregator;
mod message;

pub use aggregator::TranscriptAggregator;
pub use message::{ChatMessage, Finality, Role, TranscriptFragment, TranscriptMessage};
