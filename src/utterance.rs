//! Stitches fragments drawn from a grammar's start rule into longer words.
//!
//! Two adjacency constraints hold at every fragment boundary: no vowel may follow a
//! vowel, and no character may follow itself.

use log::{trace, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grammar::Grammar;
use crate::utils::{GrammarError, Result};

/// Vowels of Standard Roman Orthography, short and long.
pub const VOWELS: [char; 7] = ['a', 'i', 'o', 'â', 'î', 'ô', 'ê'];

/// Whether `c` is in [`VOWELS`].
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// How many fragments make up one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtteranceConfig {
    pub min_fragments: usize,
    pub max_fragments: usize,
    /// Consecutive rejected candidates tolerated before giving up. `None` retries forever.
    pub max_retries: Option<usize>,
}

impl Default for UtteranceConfig {
    fn default() -> Self {
        UtteranceConfig {
            min_fragments: 2,
            max_fragments: 8,
            max_retries: Some(10_000),
        }
    }
}

impl UtteranceConfig {
    /// Defaults with the fragment range replaced.
    pub fn fragments(min_fragments: usize, max_fragments: usize) -> Self {
        UtteranceConfig {
            min_fragments,
            max_fragments,
            ..UtteranceConfig::default()
        }
    }
}

/// How many utterances make up one block of lorem text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoremConfig {
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for LoremConfig {
    fn default() -> Self {
        LoremConfig {
            min_words: 40,
            max_words: 400,
        }
    }
}

/// Assemble an utterance of between `min_fragments` and `max_fragments` fragments.
pub fn assemble(grammar: &Grammar, min_fragments: usize, max_fragments: usize) -> Result<String> {
    let config = UtteranceConfig::fragments(min_fragments, max_fragments);
    assemble_with(grammar, &config, &mut rand::thread_rng())
}

/// Assemble an utterance using the given configuration and RNG.
///
/// The first fragment is always accepted, so the result holds at least one fragment
/// even when `min_fragments` is zero.
pub fn assemble_with<R: Rng + ?Sized>(
    grammar: &Grammar,
    config: &UtteranceConfig,
    rng: &mut R,
) -> Result<String> {
    let UtteranceConfig {
        min_fragments,
        max_fragments,
        max_retries,
    } = *config;
    if min_fragments > max_fragments {
        return Err(GrammarError::InvalidRange {
            min: min_fragments,
            max: max_fragments,
        });
    }

    let needed = rng.gen_range(min_fragments..=max_fragments);
    let mut utterance = grammar.generate_with(rng)?;
    let mut accepted = 1;
    let mut rejected = 0;

    while accepted < needed {
        let candidate = grammar.generate_with(rng)?;
        if !fits_after(&utterance, &candidate) {
            rejected += 1;
            trace!("rejected fragment {:?} after {:?}", candidate, utterance);
            if let Some(limit) = max_retries {
                if rejected >= limit {
                    warn!("no compatible fragment after {} attempts", rejected);
                    return Err(GrammarError::RetriesExhausted {
                        accepted,
                        needed,
                        attempts: rejected,
                    });
                }
            }
            continue;
        }
        utterance.push_str(&candidate);
        accepted += 1;
        rejected = 0;
    }

    Ok(utterance)
}

/// Whether `fragment` may be appended to `utterance` without breaking a boundary constraint.
pub fn fits_after(utterance: &str, fragment: &str) -> bool {
    match (utterance.chars().last(), fragment.chars().next()) {
        (Some(last), Some(first)) => !(is_vowel(last) && is_vowel(first)) && last != first,
        _ => true,
    }
}

/// Generate a sentence of pseudo-words: space-separated, capitalised, ending in a period.
pub fn lorem(grammar: &Grammar, words: &UtteranceConfig, lorem: &LoremConfig) -> Result<String> {
    lorem_with(grammar, words, lorem, &mut rand::thread_rng())
}

/// Generate a sentence of pseudo-words using the given RNG.
pub fn lorem_with<R: Rng + ?Sized>(
    grammar: &Grammar,
    words: &UtteranceConfig,
    lorem: &LoremConfig,
    rng: &mut R,
) -> Result<String> {
    if lorem.min_words > lorem.max_words {
        return Err(GrammarError::InvalidRange {
            min: lorem.min_words,
            max: lorem.max_words,
        });
    }

    let needed = rng.gen_range(lorem.min_words..=lorem.max_words);
    let sentence = (0..needed)
        .map(|_| assemble_with(grammar, words, &mut *rng))
        .collect::<Result<Vec<_>>>()?
        .join(" ");

    let mut chars = sentence.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    out.push('.');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cv_grammar() -> Grammar {
        GrammarBuilder::new()
            .rule("Syllable", "C V")
            .rule("C", "p | t | k")
            .rule("V", "a | i | o")
            .build()
            .unwrap()
    }

    #[test]
    fn test_vowel_set() {
        for c in "aioâîôê".chars() {
            assert!(is_vowel(c));
        }
        assert!(!is_vowel('e'));
        assert!(!is_vowel('u'));
        assert!(!is_vowel('k'));
    }

    #[test]
    fn test_fits_after() {
        assert!(fits_after("", "a"));
        assert!(fits_after("pa", ""));
        assert!(fits_after("pa", "ki"));
        assert!(!fits_after("pa", "ak"));
        assert!(!fits_after("pak", "ka"));
        assert!(!fits_after("pô", "êk"));
    }

    #[test]
    fn test_exact_fragment_count() {
        let grammar = cv_grammar();
        let mut rng = StdRng::seed_from_u64(42);
        for k in 1..6 {
            let config = UtteranceConfig::fragments(k, k);
            let word = assemble_with(&grammar, &config, &mut rng).unwrap();
            assert_eq!(word.chars().count(), 2 * k);
        }
    }

    #[test]
    fn test_zero_minimum_still_yields_a_fragment() {
        let word = assemble(&cv_grammar(), 0, 0).unwrap();
        assert_eq!(word.chars().count(), 2);
    }

    #[test]
    fn test_invalid_range() {
        assert!(matches!(
            assemble(&cv_grammar(), 3, 2),
            Err(GrammarError::InvalidRange { min: 3, max: 2 })
        ));
    }

    #[test]
    fn test_retry_cap() {
        // Every fragment starts and ends with a vowel, so only the seed is ever accepted.
        let grammar = GrammarBuilder::new().rule("S", "a").build().unwrap();
        let config = UtteranceConfig {
            min_fragments: 2,
            max_fragments: 2,
            max_retries: Some(50),
        };
        let result = assemble_with(&grammar, &config, &mut StdRng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(GrammarError::RetriesExhausted {
                accepted: 1,
                needed: 2,
                attempts: 50
            })
        ));
    }

    #[test]
    fn test_lorem_shape() {
        let grammar = cv_grammar();
        let words = UtteranceConfig::fragments(1, 3);
        let lorem = LoremConfig {
            min_words: 3,
            max_words: 3,
        };
        let text = lorem_with(&grammar, &words, &lorem, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(text.ends_with('.'));
        assert_eq!(text.split(' ').count(), 3);
        assert!(text.chars().next().unwrap().is_uppercase());
    }
}
