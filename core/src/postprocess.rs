//! Shaping of the prediction list before it is shown.

use crate::capitalization::Capitalization;
use crate::classify::{is_whitespace, NBSP};
use crate::spacing::rule_for;

/// Whether completions should carry a trailing space, given the character
/// right after the cursor.
///
/// No space is added when the next character already is whitespace, or when
/// it is punctuation that attaches to the preceding word (`word|.`).
pub fn needs_trailing_space(next_char: Option<char>) -> bool {
    match next_char {
        None => true,
        Some(c) if is_whitespace(c) => false,
        Some(c) => rule_for(c).map_or(true, |rule| rule.space_before),
    }
}

/// Append the trailing space where needed, then apply capitalization.
///
/// Spacing goes first; capitalization never touches the appended space.
pub fn postprocess(
    predictions: Vec<String>,
    next_char: Option<char>,
    insert_space_after: bool,
    capitalization: Capitalization,
) -> Vec<String> {
    let add_space = insert_space_after && needs_trailing_space(next_char);

    predictions
        .into_iter()
        .map(|mut prediction| {
            if add_space {
                prediction.push(NBSP);
            }
            match capitalization {
                Capitalization::None => prediction,
                _ => capitalization.apply(&prediction),
            }
        })
        .collect()
}
