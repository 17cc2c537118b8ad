use crate::config::llm_provider::LlmProvider;

/// Configuration for a chat-completion model invocation.
///
/// # Fields
///
/// - `provider`: Which OpenAI-compatible backend to use (DeepSeek, OpenAI).
/// - `model`: The model identifier (e.g., `"deepseek-chat"`).
/// - `endpoint`: API base URL; `/v1/chat/completions` is appended.
/// - `api_key`: Bearer credential. `None` sends no `Authorization` header and
///   lets the upstream reject the request.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Optional request timeout; `None` keeps the transport default.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::DeepSeek,
///     model: "deepseek-chat".to_string(),
///     endpoint: "https://api.deepseek.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: Some(2000),
///     temperature: Some(0.7),
///     top_p: None,
///     timeout_secs: None,
/// };
/// assert_eq!(cfg.model, "deepseek-chat");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// API base URL (without the `/v1/...` suffix).
    pub endpoint: String,

    /// Optional API key for bearer authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
