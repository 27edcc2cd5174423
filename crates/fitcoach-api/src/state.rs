//! Application state shared by the CLI commands.
//!
//! Loads configuration and the country list once at startup. The provider
//! is only built when a command actually needs to call it, so `prompt`,
//! `countries` and `--dry-run` work without an API key.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use fitcoach_core::coach::{CoachService, ModelSettings};
use fitcoach_infra::config::{MODEL_ENV_VAR, load_coach_config};
use fitcoach_infra::filesystem::resolve_data_dir;
use fitcoach_infra::llm::gemini::GeminiProvider;
use fitcoach_infra::llm::{create_provider, resolve_api_key};
use fitcoach_infra::reference::load_countries;
use fitcoach_types::config::CoachConfig;
use fitcoach_types::country::CountryList;

/// The coach pinned to the concrete provider.
pub type ConcreteCoachService = CoachService<GeminiProvider>;

pub struct AppState {
    pub config: CoachConfig,
    pub countries: Arc<CountryList>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data dir, load `config.toml` and the country list.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        let config = load_coach_config(&data_dir, std::env::var(MODEL_ENV_VAR).ok()).await;

        let countries = load_countries(config.countries_path.as_deref())
            .await
            .context("Failed to load the country list")?;

        tracing::debug!(
            data_dir = %data_dir.display(),
            model = %config.model,
            countries = countries.len(),
            "Application state ready"
        );

        Ok(Self {
            config,
            countries: Arc::new(countries),
            data_dir,
        })
    }

    /// Build the coach service. Fails early when no API key is configured.
    pub fn coach_service(&self) -> anyhow::Result<ConcreteCoachService> {
        let api_key = resolve_api_key(&self.config)?;
        let provider = create_provider(&self.config, api_key)
            .context("Failed to create the Gemini provider")?;
        Ok(CoachService::new(provider, ModelSettings::from(&self.config)))
    }
}
