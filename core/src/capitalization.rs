//! Capitalization of predictions.
//!
//! The classifier looks at the sentence-trimmed tokens and decides how the
//! engine's lower-case output should be cased before it is shown.

use crate::classify::is_letter;

/// Casing applied to every prediction of one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capitalization {
    /// Leave predictions unchanged.
    #[default]
    None,
    /// Upper-case the first character (`Xyz`).
    FirstLetter,
    /// Upper-case the whole prediction (`XYZ`).
    WholeWord,
}

impl Capitalization {
    /// Decide the casing for a request. First matching rule wins:
    ///
    /// 1. the user is typing a shouted word (`" XY"`) → `WholeWord`;
    /// 2. the user is typing a capitalized word (`" Xy"`) → `FirstLetter`;
    /// 3. auto-capitalize is on and the engine-visible sentence is empty or
    ///    holds only the word being typed (`"xyz. "`, `"xyz. ab"`) →
    ///    `FirstLetter`.
    pub fn classify<S: AsRef<str>>(
        tokens: &[S],
        is_new_sentence: bool,
        ends_with_space: bool,
        auto_capitalize: bool,
    ) -> Self {
        let last_word = tokens.last().map(|t| t.as_ref()).unwrap_or("");

        if !ends_with_space && last_word.chars().count() > 1 && last_word.to_uppercase() == last_word {
            return Capitalization::WholeWord;
        }

        if !ends_with_space {
            if let Some(first) = last_word.chars().next() {
                if is_letter(first) && is_upper(first) {
                    return Capitalization::FirstLetter;
                }
            }
        }

        if auto_capitalize
            && is_new_sentence
            && ((!ends_with_space && tokens.len() == 1) || (ends_with_space && tokens.is_empty()))
        {
            return Capitalization::FirstLetter;
        }

        Capitalization::None
    }

    /// Apply this casing to one prediction.
    pub fn apply(self, text: &str) -> String {
        match self {
            Capitalization::None => text.to_string(),
            Capitalization::FirstLetter => upper_first(text),
            Capitalization::WholeWord => text.to_uppercase(),
        }
    }
}

/// A character whose upper-case form is itself.
fn is_upper(ch: char) -> bool {
    let mut upper = ch.to_uppercase();
    upper.next() == Some(ch) && upper.next().is_none()
}

pub fn upper_first(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}
