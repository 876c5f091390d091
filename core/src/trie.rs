/// Prefix trie of words with occurrence counts, used for completion.
use std::collections::HashMap;

/// A simple Trie (prefix tree) storing words and how often they were seen.
///
/// Used by the dictionary engine to complete the word being typed.
///
/// # Example
/// ```
/// use typeahead_core::trie::TrieNode;
///
/// let mut trie = TrieNode::new();
/// trie.insert("world", 3);
/// trie.insert("work", 5);
/// trie.insert("word", 1);
///
/// assert!(trie.contains_word("work"));
/// assert!(!trie.contains_word("wor"));
///
/// let completions = trie.complete("wor", 2);
/// assert_eq!(completions, vec![("work".to_string(), 5), ("world".to_string(), 3)]);
/// ```
#[derive(Debug, Default)]
pub struct TrieNode {
    children: HashMap<char, Box<TrieNode>>,
    /// Occurrences of the word ending here; 0 if no word ends here.
    count: u32,
    /// When `count` is non-zero, `word` contains the full word.
    word: Option<String>,
}

impl TrieNode {
    /// Create a new empty trie root.
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            count: 0,
            word: None,
        }
    }

    /// Insert a word, adding `count` to its occurrences.
    pub fn insert(&mut self, word: &str, count: u32) {
        if word.is_empty() || count == 0 {
            return;
        }
        let mut node = self;
        for ch in word.chars() {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(TrieNode::new()));
        }
        node.count = node.count.saturating_add(count);
        node.word = Some(word.to_string());
    }

    /// Check whether the trie contains exactly the given word.
    ///
    /// Returns `true` only if `word` exists as a complete word,
    /// not just as a prefix.
    pub fn contains_word(&self, word: &str) -> bool {
        self.count_of(word) > 0
    }

    /// Occurrences of `word`, 0 if absent.
    pub fn count_of(&self, word: &str) -> u32 {
        self.find(word).map_or(0, |node| node.count)
    }

    /// Completions of `prefix` (including `prefix` itself if it is a word),
    /// most frequent first, ties in alphabetical order, at most `limit`.
    pub fn complete(&self, prefix: &str, limit: usize) -> Vec<(String, u32)> {
        let Some(start) = self.find(prefix) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if node.count > 0 {
                if let Some(w) = &node.word {
                    found.push((w.clone(), node.count));
                }
            }
            stack.extend(node.children.values().map(|c| c.as_ref()));
        }

        found.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        found.truncate(limit);
        found
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = self;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}
