//! Per-language input policy.
//!
//! Some languages glue words together with characters the generic
//! tokenizer does not split on (elided articles, for instance). A profile can
//! carry an extra separator pattern whose matches are turned into spaces
//! before the text is tokenized.

use ahash::AHashMap;
use regex::Regex;

/// Language used when a caller does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone)]
pub struct LanguageProfile {
    code: String,
    additional_separators: Option<Regex>,
}

impl LanguageProfile {
    pub fn new<T: Into<String>>(code: T) -> Self {
        Self {
            code: code.into(),
            additional_separators: None,
        }
    }

    /// Attach an extra separator pattern to this language.
    pub fn with_separators(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.additional_separators = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn additional_separators(&self) -> Option<&Regex> {
        self.additional_separators.as_ref()
    }
}

/// Profiles keyed by language code. Languages without a profile use the
/// generic rules.
#[derive(Debug, Clone, Default)]
pub struct Languages {
    profiles: AHashMap<String, LanguageProfile>,
}

impl Languages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: LanguageProfile) {
        self.profiles.insert(profile.code.clone(), profile);
    }

    pub fn get(&self, code: &str) -> Option<&LanguageProfile> {
        self.profiles.get(code)
    }

    /// Extra separator pattern for `code`, if one is configured.
    pub fn separators_for(&self, code: &str) -> Option<&Regex> {
        self.get(code).and_then(LanguageProfile::additional_separators)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
