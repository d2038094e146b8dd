use std::io;
use thiserror::Error;

/// Custom error types for the grammar generator
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed rule on line {line}: expected exactly one ':=' in {content:?}")]
    MalformedRule { line: usize, content: String },

    #[error("Empty rule name on line {line}")]
    EmptyRuleName { line: usize },

    #[error("Empty alternative on line {line}")]
    EmptyAlternative { line: usize },

    #[error("Empty token on line {line}")]
    EmptyToken { line: usize },

    #[error("Undefined rule: {0}")]
    UndefinedRule(String),

    #[error("Choice has no alternatives")]
    EmptyChoice,

    #[error("Grammar has no rules")]
    EmptyGrammar,

    #[error("Recursion limit of {depth} exceeded while expanding {rule}")]
    RecursionLimit { rule: String, depth: usize },

    #[error("Invalid fragment range: min {min} is greater than max {max}")]
    InvalidRange { min: usize, max: usize },

    #[error("Gave up after {attempts} rejected fragments ({accepted} of {needed} accepted)")]
    RetriesExhausted {
        accepted: usize,
        needed: usize,
        attempts: usize,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for GrammarError {
    fn from(err: serde_json::Error) -> Self {
        GrammarError::Config(err.to_string())
    }
}

/// Result type for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Escape `text` for use inside a pattern, leaving non-ASCII characters as they are.
///
/// Only code points below 0x80 can be regex metacharacters, so diacritic letters such
/// as `â` or `ê` pass through untouched.
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        if c.is_ascii() {
            escaped.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Check whether the opening parenthesis of `pattern` is closed by its final character.
///
/// `(a|b)` is fully parenthesized; `(a|b)(c|d)` is not, even though it starts with `(`
/// and ends with `)`. Escaped characters and bracket classes are skipped.
pub fn is_fully_parenthesized(pattern: &str) -> bool {
    if !pattern.starts_with('(') || !pattern.ends_with(')') || pattern.len() < 3 {
        return false;
    }

    let mut depth = 0usize;
    let mut in_class = false;
    let mut chars = pattern.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                depth = match depth.checked_sub(1) {
                    Some(d) => d,
                    None => return false,
                };
                if depth == 0 {
                    return i + c.len_utf8() == pattern.len();
                }
            }
            _ => {}
        }
    }

    false
}

/// Trait extension for Option<T> to convert to GrammarError
pub trait OptionExt<T> {
    fn ok_or_undefined(self, name: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_undefined(self, name: &str) -> Result<T> {
        self.ok_or_else(|| GrammarError::UndefinedRule(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_keeps_diacritics() {
        assert_eq!(escape_literal("âîôê"), "âîôê");
        assert_eq!(escape_literal("a.b"), r"a\.b");
        assert_eq!(escape_literal("ê?"), r"ê\?");
    }

    #[test]
    fn test_escape_metacharacters() {
        assert_eq!(escape_literal("(x)"), r"\(x\)");
        assert_eq!(escape_literal("a|b"), r"a\|b");
        assert_eq!(escape_literal("[*]"), r"\[\*\]");
    }

    #[test]
    fn test_fully_parenthesized() {
        assert!(is_fully_parenthesized("(a|b)"));
        assert!(is_fully_parenthesized("((a|b)c|d)"));
        assert!(is_fully_parenthesized("([()]|x)"));
        assert!(!is_fully_parenthesized("(a|b)(c|d)"));
        assert!(!is_fully_parenthesized(r"\(a\)"));
        assert!(!is_fully_parenthesized(r"(a\)"));
        assert!(!is_fully_parenthesized("()"));
        assert!(!is_fully_parenthesized("[ab]"));
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<u8> = None;
        match missing.ok_or_undefined("Coda") {
            Err(GrammarError::UndefinedRule(name)) => assert_eq!(name, "Coda"),
            other => panic!("Expected UndefinedRule, got {:?}", other),
        }
    }
}
