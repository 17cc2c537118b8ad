//! Single-user review session: code buffer, language tag, last result and
//! the in-flight guard.
//!
//! The session is shared as [`SharedSession`]. [`submit_review`] takes the
//! write lock only to begin and to finish a review, never across the network
//! call, so reads stay responsive while a review is outstanding.
//!
//! The request and the bookkeeping after it run on a spawned task, so a
//! caller that goes away mid-review (client disconnect, timeout) does not
//! leave the in-flight flag set. The result of such a review is still stored.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::{ReviewError, ReviewOutcome};
use crate::lang::{LanguageDetector, LanguageTag};
use crate::review::{ReviewResult, client::ReviewClient};

/// Session shared between request handlers.
pub type SharedSession = Arc<RwLock<ReviewSession>>;

/// Why a submission was refused without calling the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    /// The code buffer is empty or whitespace only.
    EmptyCode,
    /// Another review has not finished yet.
    InFlight,
}

/// Result of [`submit_review`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// `language` is the tag the code was reviewed as, captured at start.
    Completed {
        language: LanguageTag,
        result: ReviewResult,
    },
    Skipped(SkipReason),
}

/// Inputs captured when a review starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTicket {
    pub code: String,
    pub language: LanguageTag,
}

/// Serializable view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub code: String,
    pub language: LanguageTag,
    pub in_flight: bool,
    pub result: Option<ReviewResult>,
}

#[derive(Debug, Default)]
pub struct ReviewSession {
    code: String,
    language: LanguageTag,
    result: Option<ReviewResult>,
    in_flight: bool,
    detector: LanguageDetector,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a fresh session for sharing.
    pub fn shared() -> SharedSession {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> LanguageTag {
        self.language
    }

    pub fn result(&self) -> Option<&ReviewResult> {
        self.result.as_ref()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Replaces the buffer and re-runs detection on it.
    ///
    /// Detection may overwrite a language chosen by hand; it keeps the
    /// current tag only when nothing matches.
    pub fn edit_code(&mut self, text: impl Into<String>) {
        self.code = text.into();
        let detected = self.detector.apply(self.language, &self.code);
        if detected != self.language {
            debug!(from = %self.language, to = %detected, "language re-detected");
        }
        self.language = detected;
    }

    pub fn select_language(&mut self, language: LanguageTag) {
        self.language = language;
    }

    /// Marks a review as started and captures its inputs.
    pub fn begin_review(&mut self) -> Result<ReviewTicket, SkipReason> {
        if self.code.trim().is_empty() {
            return Err(SkipReason::EmptyCode);
        }
        if self.in_flight {
            return Err(SkipReason::InFlight);
        }
        self.in_flight = true;
        Ok(ReviewTicket {
            code: self.code.clone(),
            language: self.language,
        })
    }

    /// Clears the in-flight flag. A successful result replaces the previous
    /// one even if the buffer changed meanwhile; a failure keeps it.
    pub fn finish_review(&mut self, outcome: Result<&ReviewResult, &ReviewError>) {
        self.in_flight = false;
        if let Ok(result) = outcome {
            self.result = Some(result.clone());
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            code: self.code.clone(),
            language: self.language,
            in_flight: self.in_flight,
            result: self.result.clone(),
        }
    }
}

/// Runs one review for the session's current buffer.
///
/// # Errors
/// Propagates [`ReviewError::RequestFailed`]; the session is left with the
/// previous result and no review in flight. [`ReviewError::TaskFailed`] if
/// the review task panicked.
#[instrument(skip_all)]
pub async fn submit_review(
    shared: &SharedSession,
    client: &Arc<ReviewClient>,
) -> ReviewOutcome<SubmitOutcome> {
    let ticket = match shared.write().await.begin_review() {
        Ok(ticket) => ticket,
        Err(reason) => {
            info!(?reason, "review skipped");
            return Ok(SubmitOutcome::Skipped(reason));
        }
    };

    let task = tokio::spawn(run_review(Arc::clone(shared), Arc::clone(client), ticket));

    match task.await {
        Ok(outcome) => outcome,
        Err(join_err) => {
            let err = ReviewError::TaskFailed(join_err);
            error!(error = %err, "review task did not complete");
            shared.write().await.finish_review(Err(&err));
            Err(err)
        }
    }
}

/// Calls the model and records the outcome; runs detached from the caller.
async fn run_review(
    shared: SharedSession,
    client: Arc<ReviewClient>,
    ticket: ReviewTicket,
) -> ReviewOutcome<SubmitOutcome> {
    let outcome = client.review(&ticket.code, ticket.language).await;

    let mut session = shared.write().await;
    match outcome {
        Ok(result) => {
            if session.code != ticket.code {
                debug!("buffer changed during review; storing result anyway");
            }
            session.finish_review(Ok(&result));
            Ok(SubmitOutcome::Completed {
                language: ticket.language,
                result,
            })
        }
        Err(e) => {
            warn!(error = %e, "review failed");
            session.finish_review(Err(&e));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CONTENT: &str = r#"{"review": {"codeStructure": ["Fine"], "namingConventions": [], "codeQuality": [], "performance": [], "bestPractices": []}, "refactoredCode": "def f(): pass"}"#;

    fn client_for(server: &MockServer) -> Arc<ReviewClient> {
        let client = ReviewClient::new(LlmModelConfig {
            provider: LlmProvider::DeepSeek,
            model: "deepseek-chat".into(),
            endpoint: server.uri(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        })
        .unwrap();
        Arc::new(client)
    }

    fn ok_response() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": CONTENT}}]
        }))
    }

    fn session_with(code: &str) -> SharedSession {
        let shared = ReviewSession::shared();
        shared.try_write().unwrap().edit_code(code);
        shared
    }

    #[test]
    fn editing_detects_language() {
        let mut s = ReviewSession::new();
        assert_eq!(s.language(), LanguageTag::JavaScript);
        s.edit_code("def f():\n    return 1");
        assert_eq!(s.language(), LanguageTag::Python);
        s.edit_code("nothing recognisable");
        assert_eq!(s.language(), LanguageTag::Python);
    }

    #[test]
    fn manual_selection_is_overridden_by_later_detection() {
        let mut s = ReviewSession::new();
        s.select_language(LanguageTag::Ruby);
        assert_eq!(s.language(), LanguageTag::Ruby);
        s.edit_code("package main\nfunc main() {}");
        assert_eq!(s.language(), LanguageTag::Go);
    }

    #[test]
    fn begin_review_guards() {
        let mut s = ReviewSession::new();
        s.edit_code("   \n\t");
        assert_eq!(s.begin_review(), Err(SkipReason::EmptyCode));
        assert!(!s.in_flight());

        s.edit_code("def f(): pass");
        let ticket = s.begin_review().unwrap();
        assert_eq!(ticket.code, "def f(): pass");
        assert_eq!(ticket.language, LanguageTag::Python);
        assert!(s.in_flight());
        assert_eq!(s.begin_review(), Err(SkipReason::InFlight));
    }

    #[test]
    fn failure_keeps_previous_result() {
        let mut s = ReviewSession::new();
        s.edit_code("x = 1");
        s.begin_review().unwrap();
        s.finish_review(Ok(&ReviewResult::fallback()));
        assert!(s.result().is_some_and(ReviewResult::is_fallback));

        s.begin_review().unwrap();
        let err = ReviewError::UnknownLanguage("cobol".into());
        s.finish_review(Err(&err));
        assert!(!s.in_flight());
        assert!(s.result().is_some_and(ReviewResult::is_fallback));
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let mut s = ReviewSession::new();
        s.edit_code("fn main() {}");
        let value = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code": "fn main() {}",
                "language": "rust",
                "inFlight": false,
                "result": null
            })
        );
    }

    #[tokio::test]
    async fn submit_stores_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ok_response())
            .expect(1)
            .mount(&server)
            .await;

        let shared = session_with("def f(): pass");
        let outcome = submit_review(&shared, &client_for(&server)).await.unwrap();
        let SubmitOutcome::Completed { language, result } = outcome else {
            panic!("expected a completed review");
        };
        assert_eq!(language, LanguageTag::Python);
        assert_eq!(result.refactored_code, "def f(): pass");

        let session = shared.read().await;
        assert!(!session.in_flight());
        assert_eq!(session.result(), Some(&result));
    }

    #[tokio::test]
    async fn empty_code_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ok_response())
            .expect(0)
            .mount(&server)
            .await;

        let shared = session_with("  ");
        let outcome = submit_review(&shared, &client_for(&server)).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Skipped(SkipReason::EmptyCode));
    }

    #[tokio::test]
    async fn concurrent_submit_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ok_response().set_delay(Duration::from_millis(300)))
            .expect(1)
            .mount(&server)
            .await;

        let shared = session_with("def f(): pass");
        let client = client_for(&server);

        let first = submit_review(&shared, &client);
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let in_flight = shared.read().await.in_flight();
            (in_flight, submit_review(&shared, &client).await)
        };
        let (first, (in_flight_seen, second)) = tokio::join!(first, second);

        assert!(in_flight_seen);
        assert!(matches!(first.unwrap(), SubmitOutcome::Completed { .. }));
        assert_eq!(second.unwrap(), SubmitOutcome::Skipped(SkipReason::InFlight));
        assert!(!shared.read().await.in_flight());
    }

    #[tokio::test]
    async fn failed_submit_resets_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let shared = session_with("def f(): pass");
        let err = submit_review(&shared, &client_for(&server)).await.unwrap_err();
        assert!(matches!(err, ReviewError::RequestFailed(_)));

        let session = shared.read().await;
        assert!(!session.in_flight());
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn stale_result_overwrites() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ok_response().set_delay(Duration::from_millis(200)))
            .mount(&server)
            .await;

        let shared = session_with("def f(): pass");
        let client = client_for(&server);

        let submit = submit_review(&shared, &client);
        let edit = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            shared.write().await.edit_code("package main\nfunc main() {}");
        };
        let (outcome, ()) = tokio::join!(submit, edit);
        let SubmitOutcome::Completed { language, .. } = outcome.unwrap() else {
            panic!("expected a completed review");
        };
        assert_eq!(language, LanguageTag::Python);

        let session = shared.read().await;
        assert_eq!(session.language(), LanguageTag::Go);
        assert_eq!(
            session.result().map(|r| r.refactored_code.as_str()),
            Some("def f(): pass")
        );
    }

    #[tokio::test]
    async fn abandoned_submit_still_clears_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ok_response().set_delay(Duration::from_millis(300)))
            .expect(2)
            .mount(&server)
            .await;

        let shared = session_with("def f(): pass");
        let client = client_for(&server);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), submit_review(&shared, &client)).await;
        assert!(abandoned.is_err());
        assert!(shared.read().await.in_flight());

        tokio::time::sleep(Duration::from_millis(600)).await;
        {
            let session = shared.read().await;
            assert!(!session.in_flight());
            assert!(session.result().is_some());
        }

        let outcome = submit_review(&shared, &client).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Completed { .. }));
    }
}
