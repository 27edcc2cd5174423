//! CoachService: turns a completed questionnaire into one generation call.
//!
//! Submission is gated on `FormState::validate_for_submit`; a form that
//! fails the gate never reaches the provider. Provider failures come back
//! unchanged, there is no retry here. The caller decides whether to submit
//! again.

use tracing::{Instrument, debug, field, info, info_span};

use fitcoach_types::config::CoachConfig;
use fitcoach_types::error::ValidationError;
use fitcoach_types::form::FormState;
use fitcoach_types::llm::{
    GenerationConfig, GenerationRequest, LlmError, SafetySetting, Usage,
};

use crate::llm::LlmProvider;
use crate::prompt::build_prompt;

/// Model id, sampling settings and safety policy attached to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub generation: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl From<&CoachConfig> for ModelSettings {
    fn from(config: &CoachConfig) -> Self {
        Self {
            model: config.model.clone(),
            generation: config.generation.clone(),
            safety_settings: config.safety_settings.clone(),
        }
    }
}

/// The provider's reply to a submitted form.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachReply {
    /// Markdown text exactly as the provider returned it.
    pub text: String,
    pub model: String,
    pub usage: Usage,
}

/// Why a submission produced no reply.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] LlmError),
}

/// Submits questionnaires to a text-generation provider.
pub struct CoachService<P> {
    provider: P,
    settings: ModelSettings,
}

impl<P: LlmProvider> CoachService<P> {
    pub fn new(provider: P, settings: ModelSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// The prompt `submit` would send for this form. No gating, no provider call.
    pub fn preview_prompt(&self, form: &FormState) -> String {
        build_prompt(form)
    }

    /// Validate the form, then send its prompt to the provider once.
    pub async fn submit(&self, form: &FormState) -> Result<CoachReply, SubmitError> {
        form.validate_for_submit()?;

        let request = self.build_request(form);
        debug!(
            model = %request.model,
            prompt_chars = request.prompt.chars().count(),
            "Built generation request"
        );

        let span = info_span!(
            "gen_ai.generate",
            gen_ai.operation.name = "generate_content",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.temperature = request.config.temperature,
            gen_ai.request.top_p = request.config.top_p,
            gen_ai.request.top_k = request.config.top_k,
            gen_ai.request.max_tokens = request.config.max_output_tokens,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
        );

        let response = self
            .provider
            .generate(&request)
            .instrument(span.clone())
            .await?;

        span.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
        span.record("gen_ai.usage.output_tokens", response.usage.output_tokens);
        info!(
            model = %response.model,
            reply_chars = response.text.chars().count(),
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "Plan generated"
        );

        Ok(CoachReply {
            text: response.text,
            model: response.model,
            usage: response.usage,
        })
    }

    fn build_request(&self, form: &FormState) -> GenerationRequest {
        GenerationRequest {
            model: self.settings.model.clone(),
            prompt: build_prompt(form),
            config: self.settings.generation.clone(),
            safety_settings: self.settings.safety_settings.clone(),
        }
    }
}
