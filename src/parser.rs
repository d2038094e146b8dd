//! Line-oriented parser for the grammar notation.
//!
//! ```text
//! # comment
//! Syllable := Onset? Vowel Coda?
//! Vowel    := a | i | o | â | î | ô | ê
//! ```
//!
//! Tokens whose first character is unchanged by upper-casing name other rules;
//! everything else is literal text.

use std::io;

use log::debug;

use crate::grammar::{Grammar, Production};
use crate::utils::{GrammarError, Result};

/// Separates a rule name from its body.
pub const DEFINITION: &str = ":=";
/// Separates alternatives within a body.
pub const ALTERNATION: char = '|';
/// Marks a token as optional when it is the token's last character.
pub const OPTIONAL: char = '?';
/// Starts a comment line.
pub const COMMENT: char = '#';

/// Parse grammar source text. The first rule defined is the start rule.
pub fn parse(source: &str) -> Result<Grammar> {
    let mut grammar = Grammar::new();
    parse_lines_into(&mut grammar, source.lines().map(|line| Ok(line.to_string())))?;
    Ok(grammar)
}

pub(crate) fn parse_lines_into<I>(grammar: &mut Grammar, lines: I) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    for (index, line) in lines.enumerate() {
        let line = line.map_err(GrammarError::Io)?;
        if let Some((name, production)) = parse_rule(&line, index + 1)? {
            debug!("line {}: parsed rule {}", index + 1, name);
            grammar.insert(name, production);
        }
    }
    Ok(())
}

/// Parse one line. Blank and comment lines yield `None`.
pub fn parse_rule(line: &str, line_no: usize) -> Result<Option<(&str, Production)>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
        return Ok(None);
    }

    let mut parts = trimmed.split(DEFINITION);
    let (name, body) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(body), None) => (name.trim(), body),
        _ => {
            return Err(GrammarError::MalformedRule {
                line: line_no,
                content: trimmed.to_string(),
            });
        }
    };

    if name.is_empty() {
        return Err(GrammarError::EmptyRuleName { line: line_no });
    }

    Ok(Some((name, parse_body(body, line_no)?)))
}

/// Parse a rule body: `|`-separated alternatives of whitespace-separated tokens.
pub fn parse_body(body: &str, line_no: usize) -> Result<Production> {
    let mut alternatives = body
        .split(ALTERNATION)
        .map(|alternative| parse_alternative(alternative, line_no))
        .collect::<Result<Vec<_>>>()?;

    if alternatives.len() == 1 {
        Ok(alternatives.remove(0))
    } else {
        Ok(Production::Choice(alternatives))
    }
}

fn parse_alternative(alternative: &str, line_no: usize) -> Result<Production> {
    let mut tokens = alternative
        .split_whitespace()
        .map(|token| parse_token(token, line_no))
        .collect::<Result<Vec<_>>>()?;

    match tokens.len() {
        0 => Err(GrammarError::EmptyAlternative { line: line_no }),
        1 => Ok(tokens.remove(0)),
        _ => Ok(Production::Sequence(tokens)),
    }
}

fn parse_token(token: &str, line_no: usize) -> Result<Production> {
    match token.strip_suffix(OPTIONAL) {
        Some(value) => Ok(Production::optional(parse_value(value, line_no)?)),
        None => parse_value(token, line_no),
    }
}

fn parse_value(value: &str, line_no: usize) -> Result<Production> {
    if value.is_empty() {
        return Err(GrammarError::EmptyToken { line: line_no });
    }
    if first_char_uppercase(value) {
        Ok(Production::reference(value))
    } else {
        Ok(Production::literal(value))
    }
}

/// True when upper-casing the first character leaves it unchanged.
///
/// Digits and punctuation are unchanged too, so they start rule names.
pub fn first_char_uppercase(text: &str) -> bool {
    match text.chars().next() {
        Some(first) => first.to_uppercase().eq(std::iter::once(first)),
        None => true,
    }
}
