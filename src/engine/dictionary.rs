use crate::engine::affix::{AffixError, AffixFile, AffixKind};
use crate::engine::suggestions;
use crate::engine::SpellEngine;
use fst::{Automaton, IntoStreamer, Set, Streamer};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz'";
const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("invalid affix data")]
    Affix(#[from] AffixError),

    #[error("failed to build word set")]
    Build(#[from] fst::Error),
}

/// Word list expanded through its affix rules and stored as an FST set.
pub struct Dictionary {
    set: Set<Vec<u8>>,
    try_chars: Vec<char>,
    replacements: Vec<(String, String)>,
    keep_case: HashSet<String>,
    no_suggest: HashSet<String>,
    suggestion_limit: usize,
}

impl Dictionary {
    /// Build a dictionary from the text of a Hunspell `.aff` and `.dic` pair
    pub fn from_hunspell(locale: &str, aff: &str, dic: &str) -> Result<Self, DictionaryError> {
        let affix = AffixFile::parse(aff)?;

        let mut forms = BTreeSet::new();
        let mut keep_case = HashSet::new();
        let mut no_suggest = HashSet::new();

        for (idx, line) in dic.lines().enumerate() {
            // Morphological fields follow a tab; only the entry itself matters here.
            let entry = line.split('\t').next().unwrap_or("").trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            // First line holds the approximate entry count.
            if idx == 0 && entry.parse::<usize>().is_ok() {
                continue;
            }

            let (stem, flags) = match entry.split_once('/') {
                Some((stem, raw)) => (stem, affix.flag_mode.split(raw)),
                None => (entry, Vec::new()),
            };
            if stem.is_empty() {
                continue;
            }

            let expanded = expand(&affix, stem, &flags);
            let has_flag = |flag: &Option<String>| {
                flag.as_ref().map_or(false, |f| flags.iter().any(|g| g == f))
            };
            if has_flag(&affix.keep_case) {
                keep_case.extend(expanded.iter().cloned());
            }
            if has_flag(&affix.no_suggest) {
                no_suggest.extend(expanded.iter().cloned());
            }
            forms.extend(expanded);
        }

        let set = Set::from_iter(forms.iter())?;
        let try_chars = if affix.try_chars.is_empty() {
            DEFAULT_ALPHABET.chars().collect()
        } else {
            affix.try_chars.chars().collect()
        };

        tracing::debug!(locale, words = set.len(), "dictionary built");

        Ok(Self {
            set,
            try_chars,
            replacements: affix.replacements,
            keep_case,
            no_suggest,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        })
    }

    /// Build a plain dictionary with no affix rules (useful for testing)
    pub fn from_words<I, S>(locale: &str, words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dic: String = words
            .into_iter()
            .map(|w| format!("{}\n", w.as_ref()))
            .collect();
        Self::from_hunspell(locale, "", &dic)
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Check if the exact surface form exists in dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    /// Get all words with a given prefix
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }

    pub fn try_chars(&self) -> &[char] {
        &self.try_chars
    }

    pub fn replacements(&self) -> &[(String, String)] {
        &self.replacements
    }

    /// Whether `form` may be offered as a suggestion
    pub fn is_suggestible(&self, form: &str) -> bool {
        !self.no_suggest.contains(form)
    }

    /// Resolve a lower-case candidate to the stored form, trying its
    /// capitalised variant for proper nouns.
    pub fn resolve(&self, candidate: &str) -> Option<String> {
        if self.contains(candidate) {
            return Some(candidate.to_string());
        }
        let capitalized = capitalize(candidate);
        if capitalized != candidate && self.contains(&capitalized) {
            return Some(capitalized);
        }
        None
    }

    fn accepts_case_variant(&self, form: &str) -> bool {
        self.contains(form) && !self.keep_case.contains(form)
    }

    fn check_form(&self, word: &str) -> bool {
        if self.contains(word) {
            return true;
        }

        let lower = word.to_lowercase();
        if is_all_caps(word) {
            return self.accepts_case_variant(&capitalize(&lower))
                || self.accepts_case_variant(&lower);
        }
        if is_capitalized(word) {
            return self.accepts_case_variant(&lower);
        }
        false
    }
}

impl SpellEngine for Dictionary {
    fn check(&self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }

        // Numbers are never misspelled
        if word.chars().all(|c| c.is_numeric()) {
            return true;
        }

        if self.check_form(word) {
            return true;
        }

        // Quoting apostrophes ('word') are not part of the word
        let unquoted = word.trim_matches('\'');
        !unquoted.is_empty() && unquoted != word && self.check_form(unquoted)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        suggestions::generate(word, self, self.suggestion_limit)
    }
}

/// Every surface form a stem produces under its flags: the stem itself,
/// suffixed forms, prefixed forms and cross-product combinations.
fn expand(affix: &AffixFile, stem: &str, flags: &[String]) -> Vec<String> {
    let mut forms = vec![stem.to_string()];
    let mut cross_suffixed = Vec::new();

    for flag in flags {
        let Some(group) = affix.group(flag) else {
            continue;
        };
        if group.kind != AffixKind::Suffix {
            continue;
        }
        for rule in &group.rules {
            if let Some(form) = rule.apply(AffixKind::Suffix, stem) {
                if group.cross_product {
                    cross_suffixed.push(form.clone());
                }
                forms.push(form);
            }
        }
    }

    for flag in flags {
        let Some(group) = affix.group(flag) else {
            continue;
        };
        if group.kind != AffixKind::Prefix {
            continue;
        }
        for rule in &group.rules {
            if let Some(form) = rule.apply(AffixKind::Prefix, stem) {
                forms.push(form);
            }
            if group.cross_product {
                forms.extend(
                    cross_suffixed
                        .iter()
                        .filter_map(|suffixed| rule.apply(AffixKind::Prefix, suffixed)),
                );
            }
        }
    }

    forms
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_uppercase() && !chars.any(|c| c.is_uppercase()),
        None => false,
    }
}

pub(crate) fn is_all_caps(word: &str) -> bool {
    word.chars().any(|c| c.is_alphabetic()) && !word.chars().any(|c| c.is_lowercase())
}
