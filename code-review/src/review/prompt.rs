//! Prompt builder for the single review request.
//!
//! The model is asked for a bare JSON object; the response parser still
//! tolerates prose around it.

use crate::lang::LanguageTag;

/// Builds the review prompt for `code` written in `language`.
pub fn build_prompt(code: &str, language: LanguageTag) -> String {
    let lang = language.as_str();
    let mut s = String::new();
    s.push_str(&format!(
        "You are an expert code reviewer. Please review the following {lang} code and provide a detailed analysis.\n\n"
    ));
    s.push_str("The code is:\n\n");
    s.push_str(&format!("```{lang}\n{code}\n```\n\n"));
    s.push_str("Please provide your response in the following JSON format:\n\n");
    s.push_str(&format!(
        r#"{{
  "review": {{
    "codeStructure": [
      // points about code structure and organization
      // e.g. "Well-structured with clear interface definitions", "Good separation of concerns"
    ],
    "namingConventions": [
      // points about naming conventions
      // e.g. "Consistent PascalCase for types", "Clear and descriptive variable names"
    ],
    "codeQuality": [
      // points about code quality
      // e.g. "Proper error handling", "Good type safety"
    ],
    "performance": [
      // points about performance
      // e.g. "Efficient data structures used", "Consider caching results"
    ],
    "bestPractices": [
      // points about best practices
      // e.g. "Follows {lang} conventions", "Good use of design patterns"
    ]
  }},
  "refactoredCode": "// refactored version of the code implementing the suggested improvements"
}}
"#
    ));
    s.push_str(
        "\nEnsure each point in the arrays is specific, actionable, and complete. \
         The refactored code should be a string containing the complete improved version of the code.",
    );
    s
}
