//! Phonogram compiles a small phonotactic grammar into random words and regular expressions.
//!
//! A grammar is one rule per line. Capitalised tokens name other rules, anything
//! else is literal text, a trailing `?` makes a token optional and `|` separates
//! alternatives. The first rule is the start rule.
//!
//! # Example
//!
//! ```rust
//! use phonogram::Grammar;
//!
//! let grammar: Grammar = "
//!     Syllable := C V
//!     C := p | t | k
//!     V := a | i | o
//! "
//! .parse()
//! .unwrap();
//!
//! assert_eq!(grammar.to_pattern().unwrap(), "[ptk][aio]");
//!
//! let word = phonogram::assemble(&grammar, 2, 4).unwrap();
//! assert!(word.chars().count() >= 4);
//! ```

pub mod config;
pub mod grammar;
pub mod parser;
pub mod utils;
pub mod utterance;

pub use config::Settings;
pub use grammar::{Grammar, GrammarBuilder, GrammarConfig, Production};
pub use parser::parse;
pub use utils::{GrammarError, Result};
pub use utterance::{assemble, assemble_with, lorem, LoremConfig, UtteranceConfig, VOWELS};

/// Syllable grammar for Plains Cree in Standard Roman Orthography.
pub const PLAINS_CREE: &str = include_str!("../grammars/plains_cree.txt");
