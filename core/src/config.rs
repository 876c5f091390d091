//! Live configuration pushed by the settings surface.
//!
//! The whole record is replaced on every push; nothing is merged. Field names
//! serialize in camelCase so a settings message deserializes directly.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Default number of suggestions requested from the engine.
pub const DEFAULT_NUM_SUGGESTIONS: usize = 5;

/// Default minimum length of the active word before predicting.
pub const DEFAULT_MIN_WORD_LENGTH_TO_PREDICT: usize = 1;

/// One text expansion: typing `abbreviation` offers `expansion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextExpansion(pub String, pub String);

impl TextExpansion {
    pub fn new<A: Into<String>, E: Into<String>>(abbreviation: A, expansion: E) -> Self {
        Self(abbreviation.into(), expansion.into())
    }

    pub fn abbreviation(&self) -> &str {
        &self.0
    }

    pub fn expansion(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Number of suggestions the engine should produce; 0 disables prediction.
    pub num_suggestions: usize,

    /// Characters typed before prediction starts. 0 also enables predicting
    /// the next word right after a separator.
    pub min_word_length_to_predict: usize,

    /// Append a space after accepted completions and forced punctuation.
    pub insert_space_after_autocomplete: bool,

    /// Capitalize the first word of each sentence.
    pub auto_capitalize: bool,

    /// Correct punctuation spacing as it is typed.
    pub apply_spacing_rules: bool,

    /// Abbreviation → expansion pairs handed to every engine.
    pub text_expansions: Vec<TextExpansion>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_suggestions: DEFAULT_NUM_SUGGESTIONS,
            min_word_length_to_predict: DEFAULT_MIN_WORD_LENGTH_TO_PREDICT,
            insert_space_after_autocomplete: true,
            auto_capitalize: true,
            apply_spacing_rules: false,
            text_expansions: Vec::new(),
        }
    }
}

impl Config {
    /// Whether prediction runs right after a separator (`"foo "`).
    pub fn predict_next_word_after_separator(&self) -> bool {
        self.min_word_length_to_predict == 0
    }

    /// Render the expansion table the way engines consume it: one
    /// `abbreviation<TAB>expansion` line per entry, abbreviation lower-cased.
    pub fn expansion_table(&self) -> String {
        self.text_expansions
            .iter()
            .map(|e| format!("{}\t{}\n", e.abbreviation().to_lowercase(), e.expansion()))
            .collect()
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Error> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
