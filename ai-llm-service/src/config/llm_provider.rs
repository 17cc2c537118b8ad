use std::str::FromStr;

use crate::error_handler::{ConfigError, Provider};

/// Represents the provider (backend) used for chat completions.
///
/// Both providers speak the OpenAI-compatible `/v1/chat/completions`
/// protocol; they differ only in default endpoint, model, and credential
/// variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LlmProvider {
    /// DeepSeek hosted API.
    #[default]
    DeepSeek,
    /// OpenAI's ChatGPT API.
    OpenAI,
}

impl LlmProvider {
    /// Provider label used in errors.
    pub fn as_error_provider(self) -> Provider {
        match self {
            LlmProvider::DeepSeek => Provider::DeepSeek,
            LlmProvider::OpenAI => Provider::OpenAI,
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    /// Parses `LLM_KIND` values (`deepseek`, `openai`, `chatgpt`), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Ok(LlmProvider::DeepSeek),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
