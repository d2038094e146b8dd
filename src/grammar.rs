use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;
use std::str::FromStr;

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::parser;
use crate::utils::{escape_literal, is_fully_parenthesized, GrammarError, OptionExt, Result};

/// The body of one grammar rule
#[derive(Debug, Clone, PartialEq)]
pub enum Production {
    /// Fixed text, emitted verbatim
    Literal(String),
    /// Another rule, looked up by name in the owning grammar at use time
    Reference(String),
    /// Present or absent, decided by a fair coin on every use
    Optional(Box<Production>),
    /// Concatenation of the parts, in order
    Sequence(Vec<Production>),
    /// Exactly one alternative, picked uniformly on every use
    Choice(Vec<Production>),
}

impl Production {
    /// Shorthand for `Production::Literal`
    pub fn literal(text: &str) -> Self {
        Production::Literal(text.to_string())
    }

    /// Shorthand for `Production::Reference`
    pub fn reference(name: &str) -> Self {
        Production::Reference(name.to_string())
    }

    /// Shorthand for `Production::Optional`
    pub fn optional(inner: Production) -> Self {
        Production::Optional(Box::new(inner))
    }

    /// A literal of exactly one character.
    pub fn is_single_char_literal(&self) -> bool {
        match self {
            Production::Literal(text) => {
                let mut chars = text.chars();
                chars.next().is_some() && chars.next().is_none()
            }
            _ => false,
        }
    }

    /// Produce one random string conforming to this production.
    pub fn generate<R: Rng + ?Sized>(&self, grammar: &Grammar, rng: &mut R) -> Result<String> {
        let mut out = String::new();
        self.generate_into(grammar, rng, 0, &mut out)?;
        Ok(out)
    }

    fn generate_into<R: Rng + ?Sized>(
        &self,
        grammar: &Grammar,
        rng: &mut R,
        depth: usize,
        out: &mut String,
    ) -> Result<()> {
        match self {
            Production::Literal(text) => out.push_str(text),
            Production::Reference(name) => {
                let target = grammar.resolve(name, depth)?;
                target.generate_into(grammar, rng, depth + 1, out)?;
            }
            Production::Optional(inner) => {
                if rng.gen_bool(0.5) {
                    inner.generate_into(grammar, rng, depth, out)?;
                }
            }
            Production::Sequence(parts) => {
                for part in parts {
                    part.generate_into(grammar, rng, depth, out)?;
                }
            }
            Production::Choice(alternatives) => {
                let alternative = alternatives.choose(rng).ok_or(GrammarError::EmptyChoice)?;
                alternative.generate_into(grammar, rng, depth, out)?;
            }
        }
        Ok(())
    }

    /// Compile this production into an equivalent regular expression fragment.
    ///
    /// The fragment uses only literal characters, groups, `?`, `|` and bracket classes.
    /// It is not anchored.
    pub fn to_pattern(&self, grammar: &Grammar) -> Result<String> {
        self.pattern_at(grammar, 0)
    }

    fn pattern_at(&self, grammar: &Grammar, depth: usize) -> Result<String> {
        match self {
            Production::Literal(text) => Ok(escape_literal(text)),
            Production::Reference(name) => grammar.resolve(name, depth)?.pattern_at(grammar, depth + 1),
            Production::Optional(inner) => {
                let inner_pattern = inner.pattern_at(grammar, depth)?;
                if inner.is_single_char_literal() || is_fully_parenthesized(&inner_pattern) {
                    Ok(format!("{}?", inner_pattern))
                } else {
                    Ok(format!("({})?", inner_pattern))
                }
            }
            Production::Sequence(parts) => parts
                .iter()
                .map(|part| part.pattern_at(grammar, depth))
                .collect::<Result<Vec<_>>>()
                .map(|fragments| fragments.concat()),
            Production::Choice(alternatives) => {
                // `[]` is not a valid class.
                if alternatives.is_empty() {
                    return Err(GrammarError::EmptyChoice);
                }
                let fragments = alternatives
                    .iter()
                    .map(|alternative| alternative.pattern_at(grammar, depth))
                    .collect::<Result<Vec<_>>>()?;

                if alternatives.iter().all(Production::is_single_char_literal) {
                    Ok(format!("[{}]", fragments.concat()))
                } else {
                    Ok(format!("({})", fragments.join("|")))
                }
            }
        }
    }
}

/// Configuration options for grammar behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Maximum nesting of rule references, for generation and pattern compilation alike
    pub max_recursion_depth: usize,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig {
            max_recursion_depth: 100,
        }
    }
}

/// A named set of productions. The first rule inserted is the start rule.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: HashMap<String, Production>,
    start_symbol: Option<String>,
    config: GrammarConfig,
}

impl Grammar {
    /// Create a new empty grammar
    pub fn new() -> Self {
        Grammar::default()
    }

    /// Create a new empty grammar with custom configuration
    pub fn with_config(config: GrammarConfig) -> Self {
        Grammar {
            config,
            ..Grammar::default()
        }
    }

    /// Parse a grammar from any line-oriented reader
    pub fn from_reader<B: BufRead>(reader: B) -> Result<Self> {
        let mut grammar = Grammar::new();
        parser::parse_lines_into(&mut grammar, reader.lines())?;
        Ok(grammar)
    }

    /// Parse a grammar from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(GrammarError::Io)?;
        Grammar::from_reader(io::BufReader::new(file))
    }

    /// Define or redefine a rule.
    ///
    /// Redefinition replaces the earlier body and returns it. The start symbol is
    /// only ever set by the first insertion.
    pub fn insert(&mut self, name: &str, production: Production) -> Option<Production> {
        if self.start_symbol.is_none() {
            self.start_symbol = Some(name.to_string());
        }
        let previous = self.rules.insert(name.to_string(), production);
        if previous.is_some() {
            warn!("rule {} redefined; the later definition wins", name);
        }
        previous
    }

    /// Look up a rule by name
    pub fn rule(&self, name: &str) -> Result<&Production> {
        self.rules.get(name).ok_or_undefined(name)
    }

    fn resolve(&self, name: &str, depth: usize) -> Result<&Production> {
        if depth >= self.config.max_recursion_depth {
            return Err(GrammarError::RecursionLimit {
                rule: name.to_string(),
                depth: self.config.max_recursion_depth,
            });
        }
        self.rule(name)
    }

    /// The production of the start rule
    pub fn start(&self) -> Result<&Production> {
        let name = self.start_symbol.as_deref().ok_or(GrammarError::EmptyGrammar)?;
        self.rule(name)
    }

    /// Generate a random string from the start rule using the thread-local RNG
    pub fn generate(&self) -> Result<String> {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate a random string from the start rule using the given RNG
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        self.start()?.generate(self, rng)
    }

    /// Compile the start rule into an unanchored regular expression
    pub fn to_pattern(&self) -> Result<String> {
        self.start()?.to_pattern(self)
    }

    /// Check if the grammar defines a rule
    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Get a reference to the grammar's rules
    pub fn rules(&self) -> &HashMap<String, Production> {
        &self.rules
    }

    /// Get the start symbol, if any rule has been defined
    pub fn start_symbol(&self) -> Option<&str> {
        self.start_symbol.as_deref()
    }

    /// Get a reference to the grammar's configuration
    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Set a new configuration
    pub fn set_config(&mut self, config: GrammarConfig) {
        self.config = config;
    }
}

impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(source: &str) -> Result<Self> {
        parser::parse(source)
    }
}

/// Builder for constructing Grammar instances from rule bodies in grammar notation
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    grammar: Grammar,
    error: Option<GrammarError>,
    // Position of the rule in call order, reported as `line` in parse errors.
    index: usize,
}

impl GrammarBuilder {
    /// Create a new grammar builder with default config
    pub fn new() -> Self {
        GrammarBuilder::default()
    }

    /// Set the configuration
    pub fn config(mut self, config: GrammarConfig) -> Self {
        self.grammar.config = config;
        self
    }

    /// Add a rule, e.g. `.rule("Syllable", "Onset? Vowel")`
    ///
    /// Parse errors report the rule's 1-based position among `rule` calls as their line.
    pub fn rule(mut self, name: &str, body: &str) -> Self {
        self.index += 1;
        if self.error.is_none() {
            match parser::parse_body(body, self.index) {
                Ok(production) => {
                    self.grammar.insert(name.trim(), production);
                }
                Err(err) => self.error = Some(err),
            }
        }
        self
    }

    /// Build the grammar, failing with the first rule that did not parse
    pub fn build(self) -> Result<Grammar> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.grammar),
        }
    }
}
