use code_review::LanguageTag;
use serde::Serialize;

/// One selectable language.
#[derive(Debug, Serialize)]
pub struct LanguageOption {
    pub tag: LanguageTag,
    /// Display label, e.g. `Typescript`.
    pub label: String,
}

impl From<LanguageTag> for LanguageOption {
    fn from(tag: LanguageTag) -> Self {
        Self {
            tag,
            label: tag.label(),
        }
    }
}
