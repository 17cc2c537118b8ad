//! Crate-wide error types for code-review.
//!
//! Only transport-level failures travel as errors. Malformed model output is
//! not an error: the parser substitutes the fallback result instead.

use ai_llm_service::error_handler::AiLlmError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type ReviewOutcome<T> = Result<T, ReviewError>;

/// Root error type for the code-review crate.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The chat request failed (network, auth, non-2xx, undecodable envelope).
    #[error("Failed to review code")]
    RequestFailed(#[source] AiLlmError),

    /// The chat client could not be built from its configuration.
    #[error("review client configuration error: {0}")]
    Config(#[source] AiLlmError),

    /// A language identifier outside the supported set.
    #[error("unsupported language: {0}")]
    UnknownLanguage(String),

    /// The detached review task panicked or was cancelled.
    #[error("review task failed")]
    TaskFailed(#[source] tokio::task::JoinError),
}
