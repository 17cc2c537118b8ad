//! Review client: one chat request per review.
//!
//! Sampling parameters are fixed here regardless of the provider config.
//! There are no retries, no caching, and no timeout beyond the transport
//! default.

use std::time::Instant;

use ai_llm_service::{
    config::{default_config::config_chat_from_env, llm_model_config::LlmModelConfig},
    services::open_ai_service::OpenAiService,
};
use tracing::{error, info, instrument};

use crate::errors::{ReviewError, ReviewOutcome};
use crate::lang::LanguageTag;

use super::{ReviewResult, parse::parse_review_response, prompt::build_prompt};

/// Sampling temperature for review requests.
pub const REVIEW_TEMPERATURE: f32 = 0.7;

/// Maximum output tokens for review requests.
pub const REVIEW_MAX_TOKENS: u32 = 2000;

/// Sends code to the chat API and parses the structured critique.
#[derive(Debug)]
pub struct ReviewClient {
    chat: OpenAiService,
}

impl ReviewClient {
    /// Builds a client over `cfg`, pinning the review sampling constants.
    ///
    /// # Errors
    /// [`ReviewError::Config`] if the chat service rejects the config.
    pub fn new(mut cfg: LlmModelConfig) -> ReviewOutcome<Self> {
        cfg.temperature = Some(REVIEW_TEMPERATURE);
        cfg.max_tokens = Some(REVIEW_MAX_TOKENS);
        let chat = OpenAiService::new(cfg).map_err(ReviewError::Config)?;
        Ok(Self { chat })
    }

    /// Builds a client from environment variables (see `default_config`).
    pub fn from_env() -> ReviewOutcome<Self> {
        let cfg = config_chat_from_env().map_err(ReviewError::Config)?;
        Self::new(cfg)
    }

    /// Model identifier used for requests.
    pub fn model(&self) -> &str {
        &self.chat.config().model
    }

    /// Reviews `code` as `language`.
    ///
    /// Malformed model output is not an error: it yields
    /// [`ReviewResult::fallback`].
    ///
    /// # Errors
    /// [`ReviewError::RequestFailed`] when the HTTP exchange fails.
    #[instrument(skip_all, fields(language = %language, code_len = code.len()))]
    pub async fn review(&self, code: &str, language: LanguageTag) -> ReviewOutcome<ReviewResult> {
        let started = Instant::now();
        let prompt = build_prompt(code, language);

        let content = self.chat.generate(&prompt, None).await.map_err(|e| {
            error!(error = %e, "error calling review model");
            ReviewError::RequestFailed(e)
        })?;

        let result = parse_review_response(&content);
        info!(
            fallback = result.is_fallback(),
            latency_ms = started.elapsed().as_millis(),
            "review completed"
        );
        Ok(result)
    }
}
