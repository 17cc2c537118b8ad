/// Lowercases `s`, then uppercases the first character of every
/// space-separated word. Empty input is returned as is.
pub fn title_case(s: &str) -> String {
    s.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Splits a camelCase key into words before each capital letter and trims,
/// keeping the original casing (`codeStructure` → `code Structure`).
pub fn split_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out.trim().to_string()
}
