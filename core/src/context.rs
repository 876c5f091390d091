//! Request and response containers exchanged with the editing surface.
//!
//! Design philosophy: zero abstraction, just data transfer. The surface fills
//! a `PredictionRequest` for every edit and reads back a `PredictionResponse`.
//! Both serialize to the camelCase JSON shape the surface speaks.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifies one editable surface (a frame inside a tab).
///
/// The pipeline never looks inside the key; it is only hashed and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionKey {
    pub tab_id: i64,
    pub frame_id: i64,
}

impl SessionKey {
    pub fn new(tab_id: i64, frame_id: i64) -> Self {
        Self { tab_id, frame_id }
    }
}

/// One prediction request, created per edit event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    /// Text before the cursor. `None` when the surface sent something other
    /// than a string.
    #[serde(default, deserialize_with = "text_or_none")]
    pub text: Option<String>,

    /// Character right after the cursor, if any.
    #[serde(
        default,
        deserialize_with = "char_or_none",
        serialize_with = "char_as_string"
    )]
    pub next_char: Option<char>,

    /// Language identifier selecting the engine and cache entry.
    pub lang: String,

    #[serde(flatten)]
    pub session: SessionKey,
}

impl PredictionRequest {
    pub fn new<T: Into<String>, L: Into<String>>(
        text: T,
        next_char: Option<char>,
        lang: L,
        session: SessionKey,
    ) -> Self {
        Self {
            text: Some(text.into()),
            next_char,
            lang: lang.into(),
            session,
        }
    }
}

/// Instruction to replace the last `length` characters of the buffer with
/// `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceReplace {
    pub text: String,
    pub length: usize,
}

/// The answer to one surviving request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub predictions: Vec<String>,
    pub force_replace: Option<ForceReplace>,
    pub trigger_input_event: bool,
}

impl PredictionResponse {
    /// A response carrying nothing to show.
    pub fn empty(trigger_input_event: bool) -> Self {
        Self {
            predictions: Vec::new(),
            force_replace: None,
            trigger_input_event,
        }
    }
}

/// A response addressed to the session that asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(flatten)]
    pub session: SessionKey,
    #[serde(flatten)]
    pub response: PredictionResponse,
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn char_or_none<'de, D>(deserializer: D) -> Result<Option<char>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|s| s.chars().next()))
}

fn char_as_string<S>(value: &Option<char>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(c) => serializer.serialize_str(c.encode_utf8(&mut [0; 4])),
        None => serializer.serialize_str(""),
    }
}
