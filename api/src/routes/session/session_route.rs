use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use code_review::LanguageTag;
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::session::session_request::{EditCodeRequest, SelectLanguageRequest},
};

/// Current session state.
#[instrument(name = "get_session_route", skip_all)]
pub async fn get_session_route(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.session.read().await.snapshot();
    ApiResponse::success(snapshot).into_response()
}

/// Replaces the code buffer; the language is re-detected from the new text.
#[instrument(name = "edit_code_route", skip_all)]
pub async fn edit_code_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EditCodeRequest>,
) -> Response {
    let snapshot = {
        let mut session = state.session.write().await;
        session.edit_code(body.code);
        session.snapshot()
    };
    debug!(code_len = snapshot.code.len(), language = %snapshot.language, "code updated");
    ApiResponse::success(snapshot).into_response()
}

/// Manual language selection. Later edits may re-detect over it.
#[instrument(name = "select_language_route", skip_all)]
pub async fn select_language_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectLanguageRequest>,
) -> AppResult<Response> {
    let language: LanguageTag = body.language.parse()?;
    let snapshot = {
        let mut session = state.session.write().await;
        session.select_language(language);
        session.snapshot()
    };
    info!(%language, "language selected");
    Ok(ApiResponse::success(snapshot).into_response())
}
