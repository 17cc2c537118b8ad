use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use code_review::ReviewError;
use thiserror::Error;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Message shown to the user when the review request itself fails.
pub const REVIEW_FAILED_MESSAGE: &str = "Error reviewing code. Please try again.";

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("invalid configuration: {0}")]
    Config(#[source] ReviewError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        path: Option<&'static str>,
    },

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR, // startup-only
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Http { status, .. } => *status,
            AppError::Bind { .. } | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }

    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::BadRequest {
                path: Some(path), ..
            } => vec![ApiErrorDetail {
                path: Some((*path).to_string()),
                hint: None,
            }],
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::error(self.error_code(), self.to_string(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: err.body_text(),
            path: None,
        }
    }
}

/// Map review failures to HTTP status & code.
impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::RequestFailed(_) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "REVIEW_FAILED",
                message: REVIEW_FAILED_MESSAGE.into(),
            },
            ReviewError::UnknownLanguage(tag) => AppError::Http {
                status: StatusCode::BAD_REQUEST,
                code: "UNKNOWN_LANGUAGE",
                message: format!("unsupported language: {tag}"),
            },
            ReviewError::TaskFailed(_) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "REVIEW_FAILED",
                message: REVIEW_FAILED_MESSAGE.into(),
            },
            ReviewError::Config(_) => AppError::Config(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_errors_map_to_status() {
        let err: AppError = ReviewError::UnknownLanguage("cobol".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "UNKNOWN_LANGUAGE");
        assert_eq!(err.to_string(), "unsupported language: cobol");
    }

    #[test]
    fn bad_request_carries_path_detail() {
        let err = AppError::BadRequest {
            message: "missing".into(),
            path: Some("code"),
        };
        let details = err.details();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].path.as_deref(), Some("code"));
    }
}
