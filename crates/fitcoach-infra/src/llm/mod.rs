//! Text-generation provider implementations.
//!
//! Contains the Gemini implementation of the [`LlmProvider`] trait defined
//! in `fitcoach-core`, the API key lookup and a provider factory
//! ([`create_provider`]) driven by [`CoachConfig`].
//!
//! [`LlmProvider`]: fitcoach_core::llm::LlmProvider

pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use fitcoach_types::config::CoachConfig;
use fitcoach_types::llm::LlmError;

use self::gemini::GeminiProvider;

/// Read the API key from the environment variable named by `api_key_env`.
///
/// A missing, empty or non-Unicode variable is `AuthenticationFailed`, so
/// the user hears about it before any request is built.
pub fn resolve_api_key(config: &CoachConfig) -> Result<SecretString, LlmError> {
    api_key_from(&config.api_key_env, std::env::var(&config.api_key_env).ok())
}

fn api_key_from(var_name: &str, value: Option<String>) -> Result<SecretString, LlmError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::from(key.trim().to_string())),
        _ => Err(LlmError::AuthenticationFailed(format!(
            "no API key found; set the {var_name} environment variable"
        ))),
    }
}

/// Create the Gemini provider described by `config`.
pub fn create_provider(
    config: &CoachConfig,
    api_key: SecretString,
) -> Result<GeminiProvider, LlmError> {
    let provider = GeminiProvider::new(api_key, Duration::from_secs(config.request_timeout_secs))?
        .with_base_url(config.base_url.clone());
    tracing::debug!(
        base_url = %config.base_url,
        timeout_secs = config.request_timeout_secs,
        "Created Gemini provider"
    );
    Ok(provider)
}
