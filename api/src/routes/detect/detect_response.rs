use code_review::{LanguageScore, LanguageTag};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    /// `null` when nothing matched or the code is blank.
    pub detected: Option<LanguageTag>,
    pub scores: Vec<LanguageScore>,
}
