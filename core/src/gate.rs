//! Prediction gate: is the engine worth calling for this input?

use crate::classify::{count_keep_predicting, count_separators, is_number};
use crate::config::Config;

/// Decide whether to run the engine. Pure function of its arguments.
pub fn should_predict(active_last_word: &str, ends_with_space: bool, config: &Config) -> bool {
    // Num suggestions set to zero - prediction disabled
    if config.num_suggestions == 0 {
        return false;
    }

    // No completions for numbers and codes
    if !ends_with_space && is_number(active_last_word) {
        return false;
    }

    // "xyz abc " only predicts when the minimum word length is 0
    if ends_with_space && !config.predict_next_word_after_separator() {
        return false;
    }

    if !ends_with_space && active_last_word.chars().count() < config.min_word_length_to_predict {
        return false;
    }

    // Word glued to a separator that stops prediction, eg. "xyz@abc", "xyz?abc"
    if !ends_with_space
        && count_separators(active_last_word) != count_keep_predicting(active_last_word)
    {
        return false;
    }

    true
}
