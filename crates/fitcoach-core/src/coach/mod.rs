//! Submission orchestration: gate the form, build the prompt, call the provider.

pub mod service;

pub use service::{CoachReply, CoachService, ModelSettings, SubmitError};
