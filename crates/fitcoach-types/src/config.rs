//! Configuration types for FitCoach.
//!
//! `CoachConfig` represents the `config.toml` in the data directory. It
//! selects the model, the generation and safety settings sent with every
//! request, and where the country list comes from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::llm::{GenerationConfig, SafetySetting, default_safety_settings};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Top-level FitCoach configuration.
///
/// Loaded from `~/.fitcoach/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Model identifier passed to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Provider API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout for a generation call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// CSV file with a `name` column. The bundled list is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries_path: Option<PathBuf>,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default = "default_safety_settings")]
    pub safety_settings: Vec<SafetySetting>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            countries_path: None,
            generation: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        }
    }
}
