use serde::Deserialize;

/// Body of `POST /detect`.
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub code: String,
}
