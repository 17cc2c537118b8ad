//! Language taxonomy and heuristic detection.
//!
//! [`LanguageTag`] is the closed set of languages a snippet can be reviewed
//! as. Declaration order is the detector's table order and therefore decides
//! ties; do not reorder variants.

mod detect;
mod patterns;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ReviewError;
use crate::util::title_case;

pub use detect::{LanguageDetector, LanguageScore, detect_language, score_languages};

/// Supported languages, in detection table order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Java,
    TypeScript,
    #[default]
    JavaScript,
    Python,
    Cpp,
    CSharp,
    Php,
    Ruby,
    Go,
    Rust,
}

impl LanguageTag {
    /// All tags in table order.
    pub const ALL: [LanguageTag; 10] = [
        LanguageTag::Java,
        LanguageTag::TypeScript,
        LanguageTag::JavaScript,
        LanguageTag::Python,
        LanguageTag::Cpp,
        LanguageTag::CSharp,
        LanguageTag::Php,
        LanguageTag::Ruby,
        LanguageTag::Go,
        LanguageTag::Rust,
    ];

    /// Stable lowercase identifier (also used as the code fence tag).
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageTag::Java => "java",
            LanguageTag::TypeScript => "typescript",
            LanguageTag::JavaScript => "javascript",
            LanguageTag::Python => "python",
            LanguageTag::Cpp => "cpp",
            LanguageTag::CSharp => "csharp",
            LanguageTag::Php => "php",
            LanguageTag::Ruby => "ruby",
            LanguageTag::Go => "go",
            LanguageTag::Rust => "rust",
        }
    }

    /// Menu label, e.g. `Javascript`, `Cpp`.
    pub fn label(self) -> String {
        title_case(self.as_str())
    }
}

impl Display for LanguageTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        LanguageTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == needle)
            .ok_or_else(|| ReviewError::UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip_through_from_str() {
        for tag in LanguageTag::ALL {
            assert_eq!(tag.as_str().parse::<LanguageTag>().unwrap(), tag);
        }
        assert_eq!(" CSharp ".parse::<LanguageTag>().unwrap(), LanguageTag::CSharp);
        assert!(matches!(
            "kotlin".parse::<LanguageTag>(),
            Err(ReviewError::UnknownLanguage(s)) if s == "kotlin"
        ));
    }

    #[test]
    fn serde_uses_lowercase_identifiers() {
        let json = serde_json::to_string(&LanguageTag::TypeScript).unwrap();
        assert_eq!(json, "\"typescript\"");
        let tag: LanguageTag = serde_json::from_str("\"csharp\"").unwrap();
        assert_eq!(tag, LanguageTag::CSharp);
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(LanguageTag::JavaScript.label(), "Javascript");
        assert_eq!(LanguageTag::Cpp.label(), "Cpp");
        assert_eq!(LanguageTag::default(), LanguageTag::JavaScript);
    }
}
