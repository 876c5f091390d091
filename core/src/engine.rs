// core/src/engine.rs
//
// The prediction engine seam and the per-language registry of engines.

use ahash::AHashMap;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::prediction::Prediction;

/// Configuration key for the number of suggestions an engine returns.
pub const SUGGESTIONS_KEY: &str = "Presage.Selector.SUGGESTIONS";

/// Configuration key carrying the abbreviation expansion table.
///
/// The value holds one `abbreviation<TAB>expansion` line per entry, with
/// lower-cased abbreviations.
pub const ABBREVIATIONS_KEY: &str =
    "Presage.Predictors.DefaultAbbreviationExpansionPredictor.ABBREVIATIONS";

/// Trait that word-prediction engines implement to be driven by the
/// coordinator.
///
/// One context in, one ranked list out. The engine is a black box: the
/// coordinator never inspects its internals, only configures it and asks it
/// to predict.
pub trait PredictionEngine {
    /// Set one engine option.
    fn configure(&mut self, key: &str, value: &str) -> Result<(), EngineError>;

    /// Predict what follows `context`, best first.
    fn predict(&self, context: &str) -> Result<Vec<Prediction>, EngineError>;
}

pub type BoxedEngine = Box<dyn PredictionEngine>;

/// Engines keyed by language.
///
/// Construction is tolerant: a language whose engine cannot be built is
/// logged and left out, and every other language still gets its engine.
#[derive(Default)]
pub struct EngineRegistry {
    engines: AHashMap<String, BoxedEngine>,
    failed: Vec<String>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one engine per language with `factory`.
    pub fn build<I, S, F>(languages: I, mut factory: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&str) -> anyhow::Result<BoxedEngine>,
    {
        let mut registry = Self::new();
        for lang in languages {
            let lang = lang.as_ref();
            match factory(lang) {
                Ok(engine) => {
                    info!(lang, "prediction engine ready");
                    registry.insert(lang, engine);
                }
                Err(e) => {
                    warn!(lang, error = %e, "failed to create prediction engine");
                    registry.failed.push(lang.to_string());
                }
            }
        }
        registry
    }

    /// Register (or replace) the engine for `lang`.
    pub fn insert<L: Into<String>>(&mut self, lang: L, engine: BoxedEngine) {
        let lang = lang.into();
        self.failed.retain(|l| *l != lang);
        self.engines.insert(lang, engine);
    }

    pub fn get(&self, lang: &str) -> Option<&dyn PredictionEngine> {
        self.engines.get(lang).map(|e| e.as_ref())
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.engines.contains_key(lang)
    }

    /// Languages with a usable engine, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Languages whose engine could not be constructed.
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Send one option to every engine. Rejections are logged; returns the
    /// number of engines that accepted it.
    pub fn configure_all(&mut self, key: &str, value: &str) -> usize {
        let mut accepted = 0;
        for (lang, engine) in self.engines.iter_mut() {
            match engine.configure(key, value) {
                Ok(()) => {
                    debug!(lang = lang.as_str(), key, "engine configured");
                    accepted += 1;
                }
                Err(e) => warn!(lang = lang.as_str(), key, error = %e, "engine rejected option"),
            }
        }
        accepted
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("languages", &self.languages())
            .field("failed", &self.failed)
            .finish()
    }
}
