//! Markdown rendering of a review for display.

use crate::lang::LanguageTag;

use super::ReviewResult;

/// Renders non-empty categories as bullet sections, followed by the
/// refactored code in a fenced block tagged with `language`.
pub fn render_markdown(result: &ReviewResult, language: LanguageTag) -> String {
    let mut s = String::new();
    for (category, points) in result.review.sections() {
        if points.is_empty() {
            continue;
        }
        s.push_str(&format!("### {}\n\n", category.title()));
        for point in points {
            s.push_str(&format!("- {point}\n"));
        }
        s.push('\n');
    }
    s.push_str("### Refactored Code\n\n");
    s.push_str(&format!("```{language}\n{}\n```\n", result.refactored_code));
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::CodeReview;

    #[test]
    fn skips_empty_sections() {
        let result = ReviewResult {
            review: CodeReview {
                code_structure: vec!["Split the parser".into()],
                best_practices: vec!["Use `?`".into(), "Avoid unwrap".into()],
                ..CodeReview::default()
            },
            refactored_code: "fn main() {}".into(),
        };
        let md = render_markdown(&result, LanguageTag::Rust);
        assert_eq!(
            md,
            "### Code Structure\n\n- Split the parser\n\n\
             ### Best Practices\n\n- Use `?`\n- Avoid unwrap\n\n\
             ### Refactored Code\n\n```rust\nfn main() {}\n```\n"
        );
        assert!(!md.contains("Naming Conventions"));
    }

    #[test]
    fn fallback_renders_notice() {
        let md = render_markdown(&ReviewResult::fallback(), LanguageTag::JavaScript);
        assert!(md.starts_with("### Code Structure\n\n- Error parsing review response\n"));
        assert!(md.contains("```javascript\nError parsing refactored code\n```"));
    }
}
