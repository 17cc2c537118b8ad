//! Extraction of the review JSON from free-form model output.
//!
//! The span from the first `{` to the last `}` is parsed as JSON. A brace
//! inside prose after the object, or an unbalanced brace in a string value,
//! breaks the span; that limitation is accepted rather than brace-balancing.
//!
//! Every failure collapses to [`ReviewResult::fallback`]; callers never see a
//! parse error.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{CodeReview, ReviewResult};

lazy_static! {
    static ref JSON_SPAN: Regex = Regex::new(r"(?s)\{.*\}").expect("static JSON span pattern");
}

/// Loose view of the model output; both fields are validated after parsing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReviewResponse {
    review: Option<CodeReview>,
    refactored_code: Option<String>,
}

/// Parses the model's raw text into a [`ReviewResult`], or the fallback.
pub fn parse_review_response(raw: &str) -> ReviewResult {
    match try_parse(raw) {
        Ok(result) => {
            debug!(
                refactored_len = result.refactored_code.len(),
                "review response parsed"
            );
            result
        }
        Err(reason) => {
            warn!(%reason, raw_len = raw.len(), "error parsing review response; using fallback");
            ReviewResult::fallback()
        }
    }
}

fn try_parse(raw: &str) -> Result<ReviewResult, String> {
    let span = JSON_SPAN
        .find(raw)
        .ok_or_else(|| "no JSON found in response".to_string())?;

    let parsed: RawReviewResponse =
        serde_json::from_str(span.as_str()).map_err(|e| format!("invalid JSON: {e}"))?;

    match (parsed.review, parsed.refactored_code) {
        (Some(review), Some(refactored_code)) if !refactored_code.is_empty() => Ok(ReviewResult {
            review,
            refactored_code,
        }),
        _ => Err("invalid response structure".to_string()),
    }
}
