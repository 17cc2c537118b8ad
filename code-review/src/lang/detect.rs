//! Highest-score-wins language detection.
//!
//! A language's score is the number of its patterns present anywhere in the
//! buffer (repeats of the same pattern count once). The best score wins; ties
//! go to the language listed first in the table. A zero best score means no
//! confident guess.

use serde::Serialize;
use tracing::trace;

use super::LanguageTag;
use super::patterns::PATTERN_TABLE;

/// Score of one language against a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageScore {
    pub language: LanguageTag,
    pub score: usize,
}

/// Scores every language, in table order.
pub fn score_languages(text: &str) -> Vec<LanguageScore> {
    PATTERN_TABLE
        .iter()
        .map(|set| LanguageScore {
            language: set.tag,
            score: set.patterns.iter().filter(|re| re.is_match(text)).count(),
        })
        .collect()
}

/// Best-guess language for `text`.
///
/// Returns `None` for empty/whitespace-only input and when no pattern of any
/// language matches.
pub fn detect_language(text: &str) -> Option<LanguageTag> {
    if text.trim().is_empty() {
        return None;
    }

    let mut best: Option<LanguageScore> = None;
    for current in score_languages(text) {
        // Strictly greater keeps the earliest maximum.
        if best.is_none_or(|b| current.score > b.score) {
            best = Some(current);
        }
    }

    let best = best.filter(|b| b.score > 0)?;
    trace!(language = %best.language, score = best.score, "language detected");
    Some(best.language)
}

/// Stateless detector applied to the current tag on every edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    /// Returns the detected tag, or `current` when detection is inconclusive.
    ///
    /// A manually selected `current` is replaced as soon as any language
    /// scores above zero.
    pub fn apply(&self, current: LanguageTag, text: &str) -> LanguageTag {
        detect_language(text).unwrap_or(current)
    }
}
