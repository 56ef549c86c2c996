use crate::engine::SpellEngine;
use std::collections::HashSet;

/// Words the user has accepted during this session.
///
/// Nothing here is persisted and nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct Session {
    custom_words: HashSet<String>,
    ignored_words: HashSet<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom dictionary first, then ignored words, then the engine.
    pub fn is_known(&self, word: &str, engine: &dyn SpellEngine) -> bool {
        self.is_custom(word) || self.is_ignored(word) || engine.check(word)
    }

    /// Returns true if the word was not already in the custom dictionary
    pub fn add_to_dictionary(&mut self, word: &str) -> bool {
        self.custom_words.insert(word.to_lowercase())
    }

    /// Ignores this exact surface form only
    pub fn ignore(&mut self, word: &str) -> bool {
        self.ignored_words.insert(word.to_string())
    }

    pub fn is_custom(&self, word: &str) -> bool {
        self.custom_words.contains(&word.to_lowercase())
    }

    pub fn is_ignored(&self, word: &str) -> bool {
        self.ignored_words.contains(word)
    }

    pub fn custom_count(&self) -> usize {
        self.custom_words.len()
    }

    pub fn ignored_count(&self) -> usize {
        self.ignored_words.len()
    }
}
