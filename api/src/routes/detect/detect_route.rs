use axum::{
    extract::Json,
    response::{IntoResponse, Response},
};
use code_review::{detect_language, score_languages};
use tracing::{debug, instrument};

use crate::{
    core::http::response_envelope::ApiResponse,
    routes::detect::{detect_request::DetectRequest, detect_response::DetectResponse},
};

/// Scores `code` against every language without touching the session.
#[instrument(name = "detect_route", skip_all)]
pub async fn detect_route(Json(body): Json<DetectRequest>) -> Response {
    let detected = detect_language(&body.code);
    debug!(?detected, code_len = body.code.len(), "detection finished");
    ApiResponse::success(DetectResponse {
        detected,
        scores: score_languages(&body.code),
    })
    .into_response()
}
