pub mod config;
pub mod error;
pub mod feedback;
pub mod http;
pub mod session;
pub mod store;
pub mod transcript;
pub mod voice;

pub use config::Config;
pub use error::{ControllerError, FeedbackError, ProviderError, StoreError};
pub use feedback::{
    FeedbackGateway, FeedbackPipeline, FeedbackReport, FeedbackRequest, FeedbackSynthesizer,
    GeminiModel, HttpFeedbackClient, LanguageModel,
};
pub use http::{create_router, AppState};
pub use session::{
    CallStatus, Navigation, SessionController, SessionMode, SessionStats, StartRequest,
    TeardownPolicy,
};
pub use store::{DocumentStore, InMemoryStore, InterviewRecord, PersistenceTransactionManager};
pub use transcript::{Role, TranscriptAggregator, TranscriptMessage};
pub use voice::{BridgeConfig, CallEventBridge, NatsVoiceProvider, ProviderEvent, VoiceProvider};
