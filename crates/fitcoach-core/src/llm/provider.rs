//! LlmProvider trait definition.
//!
//! The port every text-generation backend implements. Uses native async fn
//! in traits (RPITIT, Rust 2024 edition); the coach is generic over the
//! provider so no object-safe wrapper is needed.

use fitcoach_types::llm::{GenerationRequest, GenerationResponse, LlmError};

/// Trait for text-generation backends (Gemini, test doubles).
///
/// Implementations live in fitcoach-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Provider name recorded on spans (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a single-prompt request and wait for the full reply.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, LlmError>> + Send;
}
