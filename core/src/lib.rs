//! typeahead-core
//!
//! Word-prediction middleware between text-editing surfaces and a
//! word-prediction engine. Turns the raw text before the cursor into a
//! bounded context, decides whether to predict, asks the engine (through a
//! per-language cache), and shapes the result: capitalization, trailing
//! spaces, punctuation spacing fixes.
//!
//! Public API:
//! - `Coordinator` - Per-session debouncing and the prediction pipeline
//! - `PredictionEngine` - Trait implemented by engines, `EngineRegistry` holds one per language
//! - `DictionaryEngine` - Reference engine built from a text corpus
//! - `Config` - User configuration, pushed wholesale
//! - `PredictionRequest` / `PredictionResponse` / `Delivery` - Message shapes
//! - `Languages` - Per-language input policies
pub mod classify;

pub mod spacing;
pub use spacing::SpacingRule;

pub mod normalizer;
pub use normalizer::{normalize, NormalizedInput, PAST_WORDS_COUNT};

pub mod capitalization;
pub use capitalization::Capitalization;

pub mod gate;
pub use gate::should_predict;

pub mod postprocess;
pub use postprocess::postprocess;

pub mod cache;
pub use cache::PredictionCache;

pub mod prediction;
pub use prediction::Prediction;

pub mod engine;
pub use engine::{BoxedEngine, EngineRegistry, PredictionEngine};

pub mod language;
pub use language::{LanguageProfile, Languages, DEFAULT_LANGUAGE};

pub mod context;
pub use context::{Delivery, ForceReplace, PredictionRequest, PredictionResponse, SessionKey};

pub mod session;
pub use session::{Generation, SessionRegistry};

pub mod coordinator;
pub use coordinator::Coordinator;

pub mod config;
pub use config::{Config, TextExpansion};

pub mod error;
pub use error::{EngineError, Error, Result};

// Reference engine
pub mod trie;
pub use trie::TrieNode;

pub mod word_bigram;
pub use word_bigram::WordBigram;

pub mod dictionary;
pub use dictionary::DictionaryEngine;
