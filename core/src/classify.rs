//! Stateless character and token predicates used by the pipeline.
//!
//! The separator class and the keep-predicting class are two independent
//! tables. Keep-predicting characters are a subset of the separators: a word
//! glued to one of them (`(foo`, `self-`) is still worth completing, while a
//! word glued to any other separator (`foo@bar`, `x?y`) is not.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that end a sentence.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Characters the spacing engine treats as a typed space.
pub const SPACE_CHARS: [char; 2] = ['\u{A0}', ' '];

/// Non-breaking space appended after completions and forced punctuation.
pub const NBSP: char = '\u{A0}';

/// Separator characters other than whitespace.
pub const SEPARATOR_CHARS: &[char] = &[
    '!', '"', '#', '$', '%', '&', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<', '=',
    '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

/// Separators after which prediction keeps running.
pub const KEEP_PREDICTING_CHARS: &[char] = &['[', '(', '{', '<', '/', '-', '*', '+', '=', '"'];

// Complete numeric literal: decimal with optional sign, fraction and exponent,
// signed Infinity, or an unsigned radix-prefixed integer. ASCII digits only.
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[+-]?(?:(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|Infinity)|0[xX][0-9a-fA-F]+|0[oO][0-7]+|0[bB][01]+)$",
    )
    .expect("numeric literal pattern is valid")
});

static LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{L}$").expect("letter pattern is valid"));

/// Whitespace as the editing surface sees it: Unicode `White_Space` without
/// NEL (U+0085), plus the zero-width no-break space.
pub fn is_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{FEFF}'
}

/// True for the two characters the spacing rules consider a space.
pub fn is_space_char(ch: char) -> bool {
    SPACE_CHARS.contains(&ch)
}

/// Letters in the general-category sense (`L*`). Letter numbers such as
/// `Ⅻ` and combining marks do not count.
pub fn is_letter(ch: char) -> bool {
    LETTER.is_match(ch.encode_utf8(&mut [0; 4]))
}

pub fn is_separator(ch: char) -> bool {
    is_whitespace(ch) || SEPARATOR_CHARS.contains(&ch)
}

pub fn is_keep_predicting(ch: char) -> bool {
    KEEP_PREDICTING_CHARS.contains(&ch)
}

/// Number of separator characters in `word`.
pub fn count_separators(word: &str) -> usize {
    word.chars().filter(|&c| is_separator(c)).count()
}

/// Number of keep-predicting characters in `word`.
pub fn count_keep_predicting(word: &str) -> usize {
    word.chars().filter(|&c| is_keep_predicting(c)).count()
}

/// Number of ASCII digits in `word`.
pub fn count_digits(word: &str) -> usize {
    word.chars().filter(char::is_ascii_digit).count()
}

/// Whether the whole (whitespace-trimmed) string reads as a numeric literal.
pub fn is_numeric_literal(word: &str) -> bool {
    let trimmed = word.trim_matches(is_whitespace);
    !trimmed.is_empty() && NUMERIC_LITERAL.is_match(trimmed)
}

/// Numbers and codes are not worth completing: the token is a numeric
/// literal, or it carries at least two digits (`123-45`, `a1b2`).
pub fn is_number(word: &str) -> bool {
    is_numeric_literal(word) || count_digits(word) > 1
}

/// A token closes a sentence if it is a bare terminator or ends with one.
pub fn is_sentence_terminator(token: &str) -> bool {
    token
        .chars()
        .last()
        .map_or(false, |c| SENTENCE_TERMINATORS.contains(&c))
}
