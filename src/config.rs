use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub voice: VoiceConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub feedback: FeedbackEndpointConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Voice provider connection and provider-side flow identifiers
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    pub nats_url: String,

    /// Subjects are `{prefix}.event.{session}` and `{prefix}.control.{session}`
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,

    /// Workflow used to generate a brand new interview
    pub workflow_id: String,

    /// Interviewer persona used to run a scripted interview
    pub interviewer_ref: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Missing key means the feedback endpoint reports a server configuration error
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// JSON array of interview records preloaded into the in-memory store
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackEndpointConfig {
    pub endpoint: String,
}

fn default_subject_prefix() -> String {
    "voice".to_string()
}

fn default_model() -> String {
    crate::feedback::DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    crate::feedback::DEFAULT_BASE_URL.to_string()
}

impl Config {
    /// Load from `path` (any format the `config` crate understands), then
    /// apply `LOQA_INTERVIEWS__SECTION__KEY` environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("LOQA_INTERVIEWS").separator("__"))
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        settings
            .try_deserialize()
            .context("Failed to deserialize config")
    }
}
