// core/src/word_bigram.rs
//
// Counts of adjacent word pairs, giving P(next | previous) for next-word
// prediction and for boosting completions.

use ahash::AHashMap;

/// Everything observed after one word.
#[derive(Debug, Clone, Default)]
struct Followers {
    total: u32,
    next: Vec<(String, u32)>,
}

/// Adjacent-pair counts keyed by the first word.
#[derive(Debug, Clone, Default)]
pub struct WordBigram {
    followers: AHashMap<String, Followers>,
}

impl WordBigram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` occurrences of `next` right after `prev`.
    pub fn add_bigram(&mut self, prev: &str, next: &str, count: u32) {
        let f = self.followers.entry(prev.to_string()).or_default();
        f.total = f.total.saturating_add(count);
        match f.next.iter_mut().find(|(w, _)| w == next) {
            Some((_, c)) => *c = c.saturating_add(count),
            None => f.next.push((next.to_string(), count)),
        }
    }

    /// P(next | prev), 0.0 for an unseen pair.
    pub fn get_probability(&self, prev: &str, next: &str) -> f64 {
        let Some(f) = self.followers.get(prev).filter(|f| f.total > 0) else {
            return 0.0;
        };
        f.next
            .iter()
            .find(|(w, _)| w == next)
            .map_or(0.0, |(_, c)| f64::from(*c) / f64::from(f.total))
    }

    /// Words seen after `prev` with their probabilities, most likely first,
    /// ties in alphabetical order.
    pub fn successors(&self, prev: &str, limit: usize) -> Vec<(String, f64)> {
        let Some(f) = self.followers.get(prev).filter(|f| f.total > 0) else {
            return Vec::new();
        };

        let mut ranked: Vec<&(String, u32)> = f.next.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(w, c)| (w.clone(), f64::from(*c) / f64::from(f.total)))
            .collect()
    }

    /// Number of distinct first words.
    pub fn len(&self) -> usize {
        self.followers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }

    /// Number of distinct pairs.
    pub fn total_bigrams(&self) -> usize {
        self.followers.values().map(|f| f.next.len()).sum()
    }
}
