//! Chat-completion service for OpenAI-compatible APIs (DeepSeek, OpenAI).
//!
//! Minimal, non-streaming client. The endpoint is derived from
//! `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions
//!
//! Constructor validation:
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.api_key`, when present, must be a valid header value
//! - `temperature` in `[0, 2]` and `top_p` in `[0, 1]` when set
//!
//! A missing API key is not rejected here; the upstream answers 401 and the
//! caller receives a provider error.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet, validate_range_f32,
    },
};

/// Thin client for an OpenAI-compatible chat API.
///
/// Keeps a preconfigured `reqwest::Client` (default headers, optional timeout).
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::Provider`] with `InvalidApiKey` if the key is not a header value
    /// - [`AiLlmError::Config`] with `OutOfRange` for bad sampling values
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let provider = cfg.provider.as_error_provider();

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                provider,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        if let Some(t) = cfg.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = cfg.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }

        let mut headers = header::HeaderMap::new();
        if let Some(api_key) = cfg.api_key.as_deref() {
            let value = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                ProviderError::new(provider, ProviderErrorKind::InvalidApiKey(e.to_string()))
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            has_api_key = cfg.api_key.is_some(),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// `messages` holds an optional system message and the user `prompt`.
    /// Mapped options: `model`, `temperature`, `top_p`, `max_tokens`.
    ///
    /// Returns `choices[0].message.content`, or an empty string when the
    /// upstream sent no choices or no content.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the envelope is not JSON
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let provider = self.cfg.provider.as_error_provider();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "/v1/chat/completions returned non-success status"
            );

            return Err(ProviderError::new(
                provider,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/chat/completions response"
                );
                return Err(ProviderError::new(
                    provider,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `choices[0].message.content`"
                    )),
                )
                .into());
            }
        };

        let content = out
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| {
                warn!(model = %self.cfg.model, "chat completion returned no content");
                String::new()
            });

        info!(
            model = %self.cfg.model,
            content_len = content.len(),
            latency_ms = started.elapsed().as_millis(),
            "chat completion completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Builds a chat request from config, `prompt`, and an optional system message.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(ChatMessage {
                role: "system",
                content: sys,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        Self {
            model: &cfg.model,
            messages,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::llm_provider::LlmProvider;
    use crate::error_handler::ConfigError;
    use reqwest::StatusCode;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cfg_for(server: &MockServer, api_key: Option<&str>) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::DeepSeek,
            model: "deepseek-chat".into(),
            endpoint: server.uri(),
            api_key: api_key.map(str::to_string),
            max_tokens: Some(2000),
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: None,
        }
    }

    #[tokio::test]
    async fn sends_single_user_message_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(serde_json::json!({
                "model": "deepseek-chat",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0.7,
                "max_tokens": 2000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "hi there"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let svc = OpenAiService::new(cfg_for(&server, Some("sk-test"))).unwrap();
        let out = svc.generate("hello", None).await.unwrap();
        assert_eq!(out, "hi there");
    }

    #[tokio::test]
    async fn empty_choices_yield_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let svc = OpenAiService::new(cfg_for(&server, None)).unwrap();
        assert_eq!(svc.generate("x", None).await.unwrap(), "");
    }

    #[tokio::test]
    async fn non_success_status_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let svc = OpenAiService::new(cfg_for(&server, None)).unwrap();
        let err = svc.generate("x", None).await.unwrap_err();
        match err {
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::HttpStatus(http),
                ..
            }) => {
                assert_eq!(http.status, StatusCode::UNAUTHORIZED);
                assert_eq!(http.snippet, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_endpoint_without_scheme() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::DeepSeek,
            model: "m".into(),
            endpoint: "api.deepseek.com".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        };
        assert!(matches!(
            OpenAiService::new(cfg),
            Err(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::InvalidEndpoint(_),
                ..
            }))
        ));
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(3.0),
            top_p: None,
            timeout_secs: None,
        };
        assert!(matches!(
            OpenAiService::new(cfg),
            Err(AiLlmError::Config(ConfigError::OutOfRange { field: "temperature", .. }))
        ));
    }
}
