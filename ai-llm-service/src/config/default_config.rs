//! Default chat-completion configs loaded from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND` = provider kind (`deepseek` (default), `openai`)
//!
//! DeepSeek:
//! - `DEEPSEEK_API_KEY` = bearer credential (optional here; upstream rejects without it)
//! - `DEEPSEEK_URL`     = API base, default `https://api.deepseek.com`
//! - `DEEPSEEK_MODEL`   = model, default `deepseek-chat`
//!
//! OpenAI:
//! - `OPENAI_API_KEY`, `OPENAI_URL` (default `https://api.openai.com`),
//!   `OPENAI_MODEL` (default `gpt-4o-mini`)
//!
//! Sampling parameters are left unset; callers own them.

use tracing::warn;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, env_opt, validate_http_endpoint},
};

/// Env variable names and defaults for one provider.
struct ProviderVars {
    key_var: &'static str,
    url_var: &'static str,
    model_var: &'static str,
    default_url: &'static str,
    default_model: &'static str,
}

fn vars_for(provider: LlmProvider) -> ProviderVars {
    match provider {
        LlmProvider::DeepSeek => ProviderVars {
            key_var: "DEEPSEEK_API_KEY",
            url_var: "DEEPSEEK_URL",
            model_var: "DEEPSEEK_MODEL",
            default_url: "https://api.deepseek.com",
            default_model: "deepseek-chat",
        },
        LlmProvider::OpenAI => ProviderVars {
            key_var: "OPENAI_API_KEY",
            url_var: "OPENAI_URL",
            model_var: "OPENAI_MODEL",
            default_url: "https://api.openai.com",
            default_model: "gpt-4o-mini",
        },
    }
}

/// Constructs the chat config from the process environment.
///
/// # Errors
///
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - [`ConfigError::InvalidFormat`] if the URL override is not http/https
pub fn config_chat_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_chat_with(env_opt)
}

/// Same as [`config_chat_from_env`], reading variables through `lookup`.
pub fn config_chat_with<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let provider = match lookup("LLM_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::default(),
    };
    let vars = vars_for(provider);

    let endpoint = lookup(vars.url_var).unwrap_or_else(|| vars.default_url.to_string());
    validate_http_endpoint(vars.url_var, &endpoint)?;

    let model = lookup(vars.model_var).unwrap_or_else(|| vars.default_model.to_string());
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let api_key = lookup(vars.key_var);
    if api_key.is_none() {
        warn!(
            var = vars.key_var,
            "API key is not set; requests will be rejected by the provider"
        );
    }

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_to_deepseek() {
        let cfg = config_chat_with(lookup_from(&[("DEEPSEEK_API_KEY", "sk-test")])).unwrap();
        assert_eq!(cfg.provider, LlmProvider::DeepSeek);
        assert_eq!(cfg.endpoint, "https://api.deepseek.com");
        assert_eq!(cfg.model, "deepseek-chat");
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn missing_key_is_not_an_error() {
        let cfg = config_chat_with(lookup_from(&[])).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn openai_overrides() {
        let cfg = config_chat_with(lookup_from(&[
            ("LLM_KIND", "openai"),
            ("OPENAI_URL", "http://localhost:9999"),
            ("OPENAI_MODEL", "gpt-test"),
        ]))
        .unwrap();
        assert_eq!(cfg.provider, LlmProvider::OpenAI);
        assert_eq!(cfg.endpoint, "http://localhost:9999");
        assert_eq!(cfg.model, "gpt-test");
    }

    #[test]
    fn rejects_bad_url_and_kind() {
        let err = config_chat_with(lookup_from(&[("DEEPSEEK_URL", "ftp://x")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidFormat { var: "DEEPSEEK_URL", .. })
        ));

        let err = config_chat_with(lookup_from(&[("LLM_KIND", "ollama")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::UnsupportedProvider(_))
        ));
    }
}
