//! Text-generation provider port for FitCoach.

pub mod provider;

pub use provider::LlmProvider;
