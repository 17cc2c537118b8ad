use serde::Deserialize;

/// Body of `PUT /session/code`.
#[derive(Debug, Deserialize)]
pub struct EditCodeRequest {
    pub code: String,
}

/// Body of `PUT /session/language`. Matched case-insensitively.
#[derive(Debug, Deserialize)]
pub struct SelectLanguageRequest {
    pub language: String,
}
