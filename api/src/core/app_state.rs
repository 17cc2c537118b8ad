use std::sync::Arc;

use code_review::{ReviewClient, ReviewSession, SharedSession};

use crate::error_handler::{AppError, AppResult};

/// Shared state for all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// The single review session served by this process.
    pub session: SharedSession,
    /// Chat-backed reviewer (DeepSeek or OpenAI-compatible).
    pub client: Arc<ReviewClient>,
}

impl AppState {
    pub fn new(client: ReviewClient) -> Self {
        Self {
            session: ReviewSession::shared(),
            client: Arc::new(client),
        }
    }

    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// [`AppError::Config`] when the LLM settings are invalid.
    pub fn from_env() -> AppResult<Self> {
        let client = ReviewClient::from_env().map_err(AppError::Config)?;
        Ok(Self::new(client))
    }
}
