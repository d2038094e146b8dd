use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grammar::GrammarConfig;
use crate::utils::Result;
use crate::utterance::{LoremConfig, UtteranceConfig};

/// Everything tunable, as read from a JSON settings file.
///
/// ```json
/// { "grammar": { "max_recursion_depth": 50 },
///   "utterance": { "min_fragments": 1, "max_fragments": 4, "max_retries": null },
///   "lorem": { "min_words": 5, "max_words": 12 } }
/// ```
///
/// Missing sections and fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grammar: GrammarConfig,
    pub utterance: UtteranceConfig,
    pub lorem: LoremConfig,
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read settings from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Settings::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::GrammarError;

    #[test]
    fn test_defaults_fill_gaps() {
        let settings = Settings::from_json(r#"{ "utterance": { "max_fragments": 3 } }"#).unwrap();
        assert_eq!(settings.grammar, GrammarConfig::default());
        assert_eq!(settings.utterance.min_fragments, 2);
        assert_eq!(settings.utterance.max_fragments, 3);
        assert_eq!(settings.utterance.max_retries, Some(10_000));
        assert_eq!(settings.lorem, LoremConfig::default());
    }

    #[test]
    fn test_unbounded_retries() {
        let settings = Settings::from_json(r#"{ "utterance": { "max_retries": null } }"#).unwrap();
        assert_eq!(settings.utterance.max_retries, None);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json("{ \"lorem\": 3 }"),
            Err(GrammarError::Config(_))
        ));
    }
}
