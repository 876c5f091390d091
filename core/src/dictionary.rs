// core/src/dictionary.rs
//
// Reference prediction engine built from a plain-text corpus.
//
// Unigram counts go into a `TrieNode` for prefix completion, adjacent word
// pairs into a `WordBigram` for next-word prediction and for boosting
// completions that follow the previous word.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use tracing::debug;

use crate::config::DEFAULT_NUM_SUGGESTIONS;
use crate::engine::{PredictionEngine, ABBREVIATIONS_KEY, SUGGESTIONS_KEY};
use crate::error::{EngineError, Result};
use crate::prediction::{rank, Prediction};
use crate::trie::TrieNode;
use crate::word_bigram::WordBigram;

/// How many trie completions are scored before the final cut.
const COMPLETION_POOL_FACTOR: usize = 4;

/// Word-frequency engine over a corpus.
///
/// # Example
/// ```
/// use typeahead_core::{DictionaryEngine, PredictionEngine};
///
/// let engine = DictionaryEngine::from_corpus("the cat sat on the mat. the cat ran");
/// let preds = engine.predict("the c").unwrap();
/// assert_eq!(preds[0].text, "cat");
/// ```
#[derive(Debug, Default)]
pub struct DictionaryEngine {
    words: TrieNode,
    bigrams: WordBigram,
    total_words: u64,
    abbreviations: AHashMap<String, String>,
    suggestions: usize,
}

impl DictionaryEngine {
    /// Build an engine from corpus text.
    pub fn from_corpus(text: &str) -> Self {
        let mut engine = Self {
            suggestions: DEFAULT_NUM_SUGGESTIONS,
            ..Self::default()
        };
        engine.train(text);
        engine
    }

    /// Build an engine from a corpus file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let engine = Self::from_corpus(&text);
        debug!(
            path = %path.display(),
            words = engine.total_words,
            bigrams = engine.bigrams.total_bigrams(),
            "dictionary loaded"
        );
        Ok(engine)
    }

    /// Add corpus text to the counts. Sentence terminators break bigram
    /// chains.
    pub fn train(&mut self, text: &str) {
        for sentence in text.split(['.', '!', '?', '\n']) {
            let mut prev: Option<String> = None;
            for word in corpus_words(sentence) {
                self.words.insert(&word, 1);
                self.total_words += 1;
                if let Some(p) = &prev {
                    self.bigrams.add_bigram(p, &word, 1);
                }
                prev = Some(word);
            }
        }
    }

    /// Number of word occurrences seen.
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    pub fn suggestions(&self) -> usize {
        self.suggestions
    }

    /// Expansion registered for a lower-cased abbreviation.
    pub fn abbreviation(&self, abbr: &str) -> Option<&str> {
        self.abbreviations.get(abbr).map(String::as_str)
    }

    fn unigram_probability(&self, count: u32) -> f64 {
        if self.total_words == 0 {
            0.0
        } else {
            count as f64 / self.total_words as f64
        }
    }

    fn next_words(&self, prev: Option<&str>) -> Vec<Prediction> {
        let mut out: Vec<Prediction> = prev
            .map(|p| self.bigrams.successors(p, self.suggestions))
            .unwrap_or_default()
            .into_iter()
            .map(|(word, prob)| Prediction::new(word, prob))
            .collect();

        // Top up with the most frequent words.
        if out.len() < self.suggestions {
            for (word, count) in self.words.complete("", self.suggestions.saturating_mul(2)) {
                if out.len() >= self.suggestions {
                    break;
                }
                if out.iter().all(|p| p.text != word) {
                    let prob = self.unigram_probability(count);
                    out.push(Prediction::new(word, prob));
                }
            }
        }
        out
    }

    fn completions(&self, prefix: &str, prev: Option<&str>) -> Vec<Prediction> {
        let pool = self
            .words
            .complete(prefix, self.suggestions.saturating_mul(COMPLETION_POOL_FACTOR));

        let mut scored: Vec<Prediction> = pool
            .into_iter()
            .map(|(word, count)| {
                let boost = prev.map_or(0.0, |p| self.bigrams.get_probability(p, &word));
                let prob = self.unigram_probability(count) + boost;
                Prediction::new(word, prob)
            })
            .collect();
        rank(&mut scored);

        if let Some(expansion) = self.abbreviations.get(prefix) {
            scored.retain(|p| p.text != *expansion);
            scored.insert(0, Prediction::new(expansion.clone(), 1.0));
        }
        scored
    }
}

impl PredictionEngine for DictionaryEngine {
    fn configure(&mut self, key: &str, value: &str) -> std::result::Result<(), EngineError> {
        match key {
            SUGGESTIONS_KEY => {
                self.suggestions = value.trim().parse().map_err(|_| EngineError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                Ok(())
            }
            ABBREVIATIONS_KEY => {
                self.abbreviations = parse_abbreviations(value).ok_or_else(|| {
                    EngineError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    }
                })?;
                Ok(())
            }
            _ => Err(EngineError::UnsupportedKey(key.to_string())),
        }
    }

    fn predict(&self, context: &str) -> std::result::Result<Vec<Prediction>, EngineError> {
        let words: Vec<String> = context.split_whitespace().map(str::to_lowercase).collect();
        let ends_with_space = context.chars().last().map_or(true, char::is_whitespace);

        let mut preds = if ends_with_space {
            self.next_words(words.last().map(String::as_str))
        } else {
            let last = words.last().map(String::as_str).unwrap_or("");
            let prefix = trailing_word(last);
            let prev = words.len().checked_sub(2).map(|i| words[i].as_str());
            if prefix.is_empty() {
                Vec::new()
            } else {
                self.completions(prefix, prev)
            }
        };

        preds.truncate(self.suggestions);
        Ok(preds)
    }
}

/// Lower-cased words of a corpus fragment. Apostrophes stay inside words.
fn corpus_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// The word characters at the end of a token, e.g. `hel` in `(hel`.
fn trailing_word(token: &str) -> &str {
    let start = token
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '\''))
        .map_or(0, |(i, c)| i + c.len_utf8());
    &token[start..]
}

/// Parse `abbreviation<TAB>expansion` lines. Blank lines are ignored.
fn parse_abbreviations(value: &str) -> Option<AHashMap<String, String>> {
    let mut table = AHashMap::new();
    for line in value.lines().filter(|l| !l.trim().is_empty()) {
        let (abbr, expansion) = line.split_once('\t')?;
        table.insert(abbr.to_lowercase(), expansion.to_string());
    }
    Some(table)
}
