//! Per-language heuristic pattern table.
//!
//! Each entry is tested independently as a presence check. Patterns are
//! deliberately coarse (`#include` means C++); overlap between similar
//! languages is expected.
//!
//! Word classes and boundaries are ASCII-only (`(?-u:\w)`, `(?-u:\b)`), so
//! an identifier such as `café` stops matching at the accented letter.
//! Whitespace stays Unicode-aware.

use lazy_static::lazy_static;
use regex::Regex;

use super::LanguageTag;

/// One row of the table: a tag and its compiled patterns.
pub(crate) struct PatternSet {
    pub tag: LanguageTag,
    pub patterns: Vec<Regex>,
}

fn compile(tag: LanguageTag, sources: &[&str]) -> PatternSet {
    let patterns = sources
        .iter()
        .map(|src| Regex::new(src).expect("static language pattern must compile"))
        .collect();
    PatternSet { tag, patterns }
}

lazy_static! {
    /// Table in [`LanguageTag::ALL`] order; compiled once on first use.
    pub(crate) static ref PATTERN_TABLE: Vec<PatternSet> = vec![
        compile(LanguageTag::Java, &[
            r"(?-u:\b)class\s+(?-u:\w)+\s*\{",
            r"(?-u:\b)public\s+(?:class|interface|enum)\s+(?-u:\w)+",
            r"(?-u:\b)import\s+java\.",
            r"(?-u:\b)package\s+[0-9A-Za-z_.]+;",
        ]),
        compile(LanguageTag::TypeScript, &[
            r":\s*(?:string|number|boolean|any)(?-u:\b)",
            r"interface\s+(?-u:\w)+\s*\{",
            r"type\s+(?-u:\w)+\s*=",
            r"import\s+\{\s*[0-9A-Za-z_\s,]+\}\s+from",
        ]),
        compile(LanguageTag::JavaScript, &[
            r"const\s+(?-u:\w)+\s*=",
            r"let\s+(?-u:\w)+\s*=",
            r"function\s*(?-u:\w)*\s*\(",
            r"=>\s*\{",
            r"(?-u:\b)module\.exports(?-u:\b)",
        ]),
        compile(LanguageTag::Python, &[
            r"def\s+(?-u:\w)+\s*\(",
            r"import\s+(?-u:\w)+",
            r"from\s+(?-u:\w)+\s+import",
            r"class\s+(?-u:\w)+(?:\s*\([^)]*\))?\s*:",
        ]),
        compile(LanguageTag::Cpp, &[
            r#"#include\s*[<"]"#,
            r"(?-u:\b)std::",
            r"(?-u:\b)using\s+namespace\s+std(?-u:\b)",
            r"(?-u:\b)int\s+main\s*\(\s*(?:void|int\s+argc|char\s*\*\s*argv)\s*\)",
        ]),
        compile(LanguageTag::CSharp, &[
            r"using\s+System;",
            r"namespace\s+(?-u:\w)+",
            r"public\s+class\s+(?-u:\w)+",
            r"(?-u:\b)string\[\]\s+args",
        ]),
        compile(LanguageTag::Php, &[
            r"<\?php",
            r"\$(?-u:\w)+\s*=",
            r"function\s+(?-u:\w)+\s*\(",
            r"namespace\s+(?-u:\w)+;",
        ]),
        compile(LanguageTag::Ruby, &[
            r"def\s+(?-u:\w)+",
            r#"require\s+['"][^'"]+['"]"#,
            r"class\s+(?-u:\w)+\s*<?\s*(?-u:\w)*",
            r"(?-u:\b)module\s+(?-u:\w)+",
        ]),
        compile(LanguageTag::Go, &[
            r"package\s+main",
            r"import\s+\(",
            r"func\s+(?-u:\w)+\s*\(",
            r"type\s+(?-u:\w)+\s+struct",
        ]),
        compile(LanguageTag::Rust, &[
            r"fn\s+(?-u:\w)+",
            r"let\s+mut\s+(?-u:\w)+",
            r"use\s+std::",
            r"impl\s+(?-u:\w)+",
        ]),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_tag_order() {
        let tags: Vec<LanguageTag> = PATTERN_TABLE.iter().map(|p| p.tag).collect();
        assert_eq!(tags, LanguageTag::ALL.to_vec());
        assert!(PATTERN_TABLE.iter().all(|p| !p.patterns.is_empty()));
    }
}
