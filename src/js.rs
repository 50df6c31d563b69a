//! Small helpers for writing JavaScript tokens.
use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT_RX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_$]+").unwrap());

/// Single-quoted JS string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Turn an arbitrary property name into an identifier stem. Never empty and
/// never starts with a digit; callers always append `_<n>`.
pub fn identifier_stem(name: &str) -> String {
    let cleaned = NON_IDENT_RX.replace_all(name, "_");
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        return "field".to_string();
    }
    if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{cleaned}");
    }
    cleaned.to_string()
}
