use axum::response::{IntoResponse, Response};
use code_review::LanguageTag;
use tracing::instrument;

use crate::{
    core::http::response_envelope::ApiResponse,
    routes::languages::languages_response::LanguageOption,
};

/// Lists the supported languages in detection-table order.
#[instrument(name = "languages_route")]
pub async fn languages_route() -> Response {
    let options: Vec<LanguageOption> = LanguageTag::ALL.into_iter().map(Into::into).collect();
    ApiResponse::success(options).into_response()
}
