use code_review::{LanguageTag, ReviewResult};
use serde::Serialize;

/// Body of a completed `POST /session/review`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub language: LanguageTag,
    /// `true` when the model output could not be parsed.
    pub fallback: bool,
    #[serde(flatten)]
    pub result: ReviewResult,
}

/// Body of `GET /session/review/report`.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub language: LanguageTag,
    pub markdown: String,
}
