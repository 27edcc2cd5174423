//! Business logic for FitCoach.
//!
//! Prompt assembly, the `LlmProvider` port and the `CoachService` that turns
//! a completed questionnaire into a single generation call. No IO crates
//! here; concrete providers live in `fitcoach-infra`.

pub mod coach;
pub mod llm;
pub mod prompt;
