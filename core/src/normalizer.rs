//! Input normalization.
//!
//! Turns the raw text before the cursor into the bounded context handed to
//! the engine:
//!
//! 1. note whether the text ends with whitespace,
//! 2. apply the language's extra separators,
//! 3. keep the last [`PAST_WORDS_COUNT`] whitespace-separated tokens,
//! 4. drop everything up to and including the last sentence terminator,
//! 5. join the survivors with single spaces (plus a trailing space if the
//!    text had one).
//!
//! The active last word is taken from the window of step 3, not from the
//! sentence-trimmed tokens, so `"Done."` is still the word being typed.

use regex::Regex;

use crate::classify::{is_keep_predicting, is_sentence_terminator, is_whitespace};

/// Number of trailing tokens kept as engine context.
pub const PAST_WORDS_COUNT: usize = 5;

/// Result of normalizing one text buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedInput {
    /// Context for the engine and key of the prediction cache.
    pub stream: String,
    /// Tokens after the sentence trim.
    pub tokens: Vec<String>,
    /// In-progress word used by the prediction gate.
    pub active_last_word: String,
    pub ends_with_space: bool,
    /// A sentence terminator was found inside the window.
    pub is_new_sentence: bool,
    /// False when the surface sent no usable text; prediction is disabled.
    pub valid: bool,
}

impl NormalizedInput {
    /// Normalized form of a malformed (non-textual) input.
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Normalize `text`. `None` stands for input that was not a string.
pub fn normalize(text: Option<&str>, separators: Option<&Regex>) -> NormalizedInput {
    let Some(text) = text else {
        return NormalizedInput::invalid();
    };

    let ends_with_space = text.trim_end_matches(is_whitespace) != text;

    let text = match separators {
        Some(re) => re.replace_all(text, " "),
        None => std::borrow::Cow::Borrowed(text),
    };

    let window = last_words(&text, PAST_WORDS_COUNT);
    let (tokens, is_new_sentence) = remove_prev_sentence(&window);

    let mut stream = tokens.join(" ");
    if ends_with_space {
        stream.push(' ');
    }

    let active_last_word = window
        .last()
        .and_then(|word| word.split(is_keep_predicting).filter(|f| !f.is_empty()).last())
        .unwrap_or("")
        .to_string();

    NormalizedInput {
        stream,
        tokens: tokens.iter().map(|t| t.to_string()).collect(),
        active_last_word,
        ends_with_space,
        is_new_sentence,
        valid: true,
    }
}

/// Split on whitespace runs, drop empty fragments and keep the last `count`.
pub fn last_words(text: &str, count: usize) -> Vec<&str> {
    let words: Vec<&str> = text.split(is_whitespace).filter(|w| !w.is_empty()).collect();
    let skip = words.len().saturating_sub(count);
    words[skip..].to_vec()
}

/// Keep only the tokens after the last sentence terminator.
///
/// Returns the surviving tokens and whether a terminator was found.
pub fn remove_prev_sentence<'a>(words: &[&'a str]) -> (Vec<&'a str>, bool) {
    match words.iter().rposition(|w| is_sentence_terminator(w)) {
        Some(index) => (words[index + 1..].to_vec(), true),
        None => (words.to_vec(), false),
    }
}
