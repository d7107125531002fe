use crate::feedback::FeedbackGateway;
use crate::store::{DocumentStore, InMemoryStore};
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Interview and feedback records
    pub store: Arc<dyn DocumentStore>,

    /// Feedback generation; `None` when no language model is configured
    pub feedback: Option<Arc<dyn FeedbackGateway>>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, feedback: Option<Arc<dyn FeedbackGateway>>) -> Self {
        Self { store, feedback }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), None)
    }
}
