//! Review result model and the review pipeline.
//!
//! Pipeline: [`prompt::build_prompt`] → [`client::ReviewClient`] (one chat
//! call) → [`parse::parse_review_response`] → [`render::render_markdown`].

pub mod client;
pub mod parse;
pub mod prompt;
pub mod render;

use serde::{Deserialize, Serialize};

use crate::util::{split_camel_case, title_case};

/// Notice placed in the first list of the fallback result.
pub const FALLBACK_REVIEW_NOTICE: &str = "Error parsing review response";

/// Refactored-code text of the fallback result.
pub const FALLBACK_REFACTORED_CODE: &str = "Error parsing refactored code";

/// The five categorized point-lists of a review.
///
/// Lists absent from the model output deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReview {
    #[serde(default)]
    pub code_structure: Vec<String>,
    #[serde(default)]
    pub naming_conventions: Vec<String>,
    #[serde(default)]
    pub code_quality: Vec<String>,
    #[serde(default)]
    pub performance: Vec<String>,
    #[serde(default)]
    pub best_practices: Vec<String>,
}

impl CodeReview {
    /// Points of one category.
    pub fn points(&self, category: ReviewCategory) -> &[String] {
        match category {
            ReviewCategory::CodeStructure => &self.code_structure,
            ReviewCategory::NamingConventions => &self.naming_conventions,
            ReviewCategory::CodeQuality => &self.code_quality,
            ReviewCategory::Performance => &self.performance,
            ReviewCategory::BestPractices => &self.best_practices,
        }
    }

    /// `(category, points)` pairs in display order.
    pub fn sections(&self) -> impl Iterator<Item = (ReviewCategory, &[String])> {
        ReviewCategory::ALL.into_iter().map(|c| (c, self.points(c)))
    }
}

/// Structured output of one review request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub review: CodeReview,
    pub refactored_code: String,
}

impl ReviewResult {
    /// Substitute returned when the model output cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            review: CodeReview {
                code_structure: vec![FALLBACK_REVIEW_NOTICE.to_string()],
                ..CodeReview::default()
            },
            refactored_code: FALLBACK_REFACTORED_CODE.to_string(),
        }
    }

    /// `true` if this is the parse-failure substitute.
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// Review categories in the order the model is asked for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewCategory {
    CodeStructure,
    NamingConventions,
    CodeQuality,
    Performance,
    BestPractices,
}

impl ReviewCategory {
    pub const ALL: [ReviewCategory; 5] = [
        ReviewCategory::CodeStructure,
        ReviewCategory::NamingConventions,
        ReviewCategory::CodeQuality,
        ReviewCategory::Performance,
        ReviewCategory::BestPractices,
    ];

    /// JSON key of the category inside `review`.
    pub fn key(self) -> &'static str {
        match self {
            ReviewCategory::CodeStructure => "codeStructure",
            ReviewCategory::NamingConventions => "namingConventions",
            ReviewCategory::CodeQuality => "codeQuality",
            ReviewCategory::Performance => "performance",
            ReviewCategory::BestPractices => "bestPractices",
        }
    }

    /// Heading, e.g. `Code Structure`.
    pub fn title(self) -> String {
        title_case(&split_camel_case(self.key()))
    }
}
