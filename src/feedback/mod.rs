//! Feedback synthesis
//!
//! This module turns a finished transcript into a saved `FeedbackReport`:
//! - `build_prompt`: evaluator prompt embedding the report schema
//! - `LanguageModel` / `GeminiModel`: the model call
//! - `parse_model_output`: strict parsing of untrusted model text with a fallback
//! - `FeedbackSynthesizer`: preconditions, model call, fallback handling
//! - `FeedbackGateway`: synthesis + persistence, in-process (`FeedbackPipeline`)
//!   or over HTTP (`HttpFeedbackClient`)

mod client;
mod gateway;
mod llm;
mod parse;
mod pipeline;
mod prompt;
mod report;
mod synthesizer;

pub use client::HttpFeedbackClient;
pub use gateway::{FeedbackGateway, FeedbackReceipt, FeedbackRequest, FeedbackResponse};
pub use llm::{GeminiModel, LanguageModel, LanguageModelError, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use parse::{parse_model_output, strip_code_fences, ModelOutputError, REQUIRED_KEYS};
pub use pipeline::FeedbackPipeline;
pub use prompt::build_prompt;
pub use report::{CategoryAssessment, FeedbackReport, OverallAssessment, FALLBACK_SUMMARY};
pub use synthesizer::FeedbackSynthesizer;
