use super::message::{ChatMessage, TranscriptFragment, TranscriptMessage};
use tracing::debug;

/// Append-only log of final transcript fragments, in receipt order
#[derive(Debug, Default)]
pub struct TranscriptAggregator {
    messages: Vec<TranscriptMessage>,
    next_sequence: u64,
}

impl TranscriptAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment. Non-final fragments are discarded and `None` is returned.
    pub fn append(&mut self, fragment: TranscriptFragment) -> Option<&TranscriptMessage> {
        if !fragment.is_final() {
            return None;
        }

        let message = TranscriptMessage {
            role: fragment.role,
            content: fragment.content,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        debug!(
            "Transcript #{} [{}]: {}",
            message.sequence, message.role, message.content
        );

        self.messages.push(message);
        self.messages.last()
    }

    /// Most recently appended message
    pub fn latest(&self) -> Option<&TranscriptMessage> {
        self.messages.last()
    }

    pub fn all(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Role/content pairs in transcript order
    pub fn to_chat_messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().map(ChatMessage::from).collect()
    }
}
