//! HTTP API for feedback generation
//!
//! This module provides a REST API:
//! - POST /api/generate-feedback - Evaluate a transcript and save the report
//! - GET /interviews/:id - Fetch an interview record
//! - GET /interviews/:id/feedback - Feedback records for an interview
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
