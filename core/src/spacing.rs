//! Punctuation spacing rules.
//!
//! Each punctuation mark has a convention for the space before and after it:
//! `word. Next`, `word (aside)`, `self-made`. When the user types a mark in
//! the wrong convention (`word .`, `word(`), the spacing engine emits a
//! forced replacement of the buffer's last one or two characters instead of
//! a prediction.

use crate::classify::{is_space_char, NBSP};
use crate::context::ForceReplace;

/// Spacing convention for a single punctuation character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingRule {
    pub space_before: bool,
    pub space_after: bool,
}

const CLOSING: SpacingRule = SpacingRule {
    space_before: false,
    space_after: true,
};

const OPENING: SpacingRule = SpacingRule {
    space_before: true,
    space_after: false,
};

const SPACED: SpacingRule = SpacingRule {
    space_before: true,
    space_after: true,
};

const JOINING: SpacingRule = SpacingRule {
    space_before: false,
    space_after: false,
};

static SPACING_RULES: phf::Map<char, SpacingRule> = phf::phf_map! {
    '.' => CLOSING,
    ',' => CLOSING,
    ']' => CLOSING,
    ')' => CLOSING,
    '}' => CLOSING,
    '>' => CLOSING,
    '!' => CLOSING,
    ':' => CLOSING,
    ';' => CLOSING,
    '?' => CLOSING,
    '[' => OPENING,
    '(' => OPENING,
    '{' => OPENING,
    '<' => OPENING,
    '/' => SPACED,
    '—' => JOINING,
    '–' => JOINING,
    '-' => JOINING,
    '’' => JOINING,
    '*' => JOINING,
    '+' => JOINING,
    '=' => JOINING,
};

/// Look up the spacing rule for a character.
pub fn rule_for(ch: char) -> Option<SpacingRule> {
    SPACING_RULES.get(&ch).copied()
}

/// Inspect the raw tail of `text` and produce a forced replacement when the
/// last character was typed against its spacing convention.
///
/// Returns `None` when:
/// - the text has fewer than two characters,
/// - the last character has no rule,
/// - the third-to-last character is already a space (no double correction),
/// - the space before the last character already matches its rule.
pub fn force_replace(text: &str, insert_space_after: bool) -> Option<ForceReplace> {
    let mut tail = text.chars().rev();
    let last = tail.next()?;
    let before_last = tail.next()?;
    let before_that = tail.next();

    let rule = rule_for(last)?;
    if before_that.map_or(false, is_space_char) {
        return None;
    }
    if rule.space_before == is_space_char(before_last) {
        return None;
    }

    let mut replacement = String::with_capacity(8);
    if rule.space_before {
        replacement.push(NBSP);
    }
    replacement.push(last);
    if insert_space_after && rule.space_after {
        replacement.push(NBSP);
    }

    Some(ForceReplace {
        text: replacement,
        length: 2 - usize::from(rule.space_before),
    })
}
