use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use code_review::{
    ReviewResult, SkipReason, SubmitOutcome, review::render::render_markdown, submit_review,
};
use tracing::{info, instrument, warn};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::review::review_response::{ReportResponse, ReviewResponse},
};

/// Reviews the current buffer with the chat model.
///
/// Refused with 409 while another review is outstanding and with 400 when the
/// buffer is blank; neither case reaches the model.
#[instrument(name = "submit_review_route", skip_all)]
pub async fn submit_review_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    match submit_review(&state.session, &state.client).await? {
        SubmitOutcome::Completed { language, result } => {
            info!(%language, fallback = result.is_fallback(), "review stored");
            Ok(ApiResponse::success(ReviewResponse {
                language,
                fallback: result.is_fallback(),
                result,
            })
            .into_response())
        }
        SubmitOutcome::Skipped(SkipReason::InFlight) => {
            warn!("review already in flight");
            Err(AppError::Http {
                status: StatusCode::CONFLICT,
                code: "REVIEW_IN_FLIGHT",
                message: "A review is already in progress.".into(),
            })
        }
        SubmitOutcome::Skipped(SkipReason::EmptyCode) => Err(AppError::BadRequest {
            message: "Code is empty.".into(),
            path: Some("code"),
        }),
    }
}

fn no_result() -> AppError {
    AppError::Http {
        status: StatusCode::NOT_FOUND,
        code: "NO_REVIEW_RESULT",
        message: "No review has completed yet.".into(),
    }
}

/// Markdown rendering of the last result, fenced with the current language.
#[instrument(name = "review_report_route", skip_all)]
pub async fn review_report_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let session = state.session.read().await;
    let result: &ReviewResult = session.result().ok_or_else(no_result)?;
    let language = session.language();
    Ok(ApiResponse::success(ReportResponse {
        language,
        markdown: render_markdown(result, language),
    })
    .into_response())
}

/// Refactored code of the last result, verbatim, for copying to a clipboard.
#[instrument(name = "refactored_code_route", skip_all)]
pub async fn refactored_code_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let session = state.session.read().await;
    let result = session.result().ok_or_else(no_result)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        result.refactored_code.clone(),
    )
        .into_response())
}
