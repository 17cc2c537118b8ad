//! Shared LLM client used by the code review backend.
//!
//! - [`config`]: model/provider configuration and env-driven defaults
//! - [`services::open_ai_service`]: non-streaming `/v1/chat/completions` client
//! - [`error_handler`]: unified [`AiLlmError`](error_handler::AiLlmError)
//! - [`telemetry`]: subscriber setup shared by the binary and tests

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;
