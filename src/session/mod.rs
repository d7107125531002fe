//! Live session management
//!
//! This module provides the `SessionController` that manages:
//! - Call lifecycle state (`Inactive -> Connecting -> Active -> Finished`)
//! - Provider event subscription for the session's lifetime
//! - Transcript aggregation
//! - Feedback generation and navigation on completion

mod completion;
mod config;
mod controller;
mod session;
mod stats;
mod status;

pub use completion::{CompletionTask, Navigation, TeardownPolicy};
pub use config::{SessionMode, StartRequest};
pub use controller::SessionController;
pub use session::Session;
pub use stats::SessionStats;
pub use status::{CallStatus, InvalidTransition, Trigger};
