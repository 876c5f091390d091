//! Error types for typeahead-core.
//!
//! Nothing here ever reaches the editing surface: every failure on the
//! request path degrades to "no prediction, no forced replacement".

use thiserror::Error;

/// Errors raised while loading configuration or talking to an engine.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading configuration or engine resources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized.
    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Engine rejected a call.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors reported by a prediction engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine does not understand this configuration key.
    #[error("unsupported configuration key: {0}")]
    UnsupportedKey(String),

    /// The value for a known key could not be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// A resource the engine depends on is missing or unreadable.
    #[error("engine resource error: {0}")]
    Resource(String),
}

/// Result alias for typeahead-core operations.
pub type Result<T> = std::result::Result<T, Error>;
