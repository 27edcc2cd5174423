//! Google Gemini provider implementation.
//!
//! [`GeminiProvider`] implements the
//! [`LlmProvider`](fitcoach_core::llm::LlmProvider) trait against the
//! Generative Language `generateContent` endpoint.

pub mod client;
pub mod types;

pub use client::GeminiProvider;
