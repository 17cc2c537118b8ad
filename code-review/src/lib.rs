//! Code review core.
//!
//! - [`lang`]: closed set of language tags and the regex scoring detector
//! - [`review`]: prompt, chat call, JSON extraction with fallback, rendering
//! - [`session`]: the exclusively-owned state of one reviewing user
//! - [`errors`]: crate-wide error types

pub mod errors;
pub mod lang;
pub mod review;
pub mod session;
pub mod util;

pub use errors::{ReviewError, ReviewOutcome};
pub use lang::{LanguageDetector, LanguageScore, LanguageTag, detect_language, score_languages};
pub use review::client::ReviewClient;
pub use review::{CodeReview, ReviewCategory, ReviewResult};
pub use session::{
    ReviewSession, ReviewTicket, SessionSnapshot, SharedSession, SkipReason, SubmitOutcome,
    submit_review,
};
