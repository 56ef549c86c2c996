use crate::checker::tokenizer::is_word_char;
use crate::render::Overlay;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Which occurrences of a word a replacement touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplaceScope {
    FirstIgnoreCase,
    FirstMatchCase,
    AllIgnoreCase,
    AllMatchCase,
}

impl ReplaceScope {
    pub fn is_global(self) -> bool {
        matches!(self, ReplaceScope::AllIgnoreCase | ReplaceScope::AllMatchCase)
    }

    pub fn ignores_case(self) -> bool {
        matches!(self, ReplaceScope::FirstIgnoreCase | ReplaceScope::AllIgnoreCase)
    }
}

/// Replace whole-word occurrences of `word` in `text`.
///
/// A match only counts when the characters around it are not word
/// characters, so `cat` never matches inside `concat`. The replacement is
/// inserted literally. Returns the new text and the number of replacements.
pub fn replace_word(
    text: &str,
    word: &str,
    replacement: &str,
    scope: ReplaceScope,
) -> Result<(String, usize), regex::Error> {
    if word.is_empty() {
        return Ok((text.to_string(), 0));
    }

    let regex = RegexBuilder::new(&regex::escape(word))
        .case_insensitive(scope.ignores_case())
        .build()?;

    let mut replaced = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;

    for found in regex.find_iter(text) {
        if !is_whole_word(text, found.start(), found.end()) {
            continue;
        }
        replaced.push_str(&text[last..found.start()]);
        replaced.push_str(replacement);
        last = found.end();
        count += 1;

        if !scope.is_global() {
            break;
        }
    }
    replaced.push_str(&text[last..]);

    Ok((replaced, count))
}

/// Apply the top suggestion of every misspelling in `overlay`, in order.
///
/// Returns the corrected text and the number of misspellings that had a
/// suggestion to apply.
pub fn correct_all(
    text: &str,
    overlay: &Overlay,
    scope: ReplaceScope,
) -> Result<(String, usize), regex::Error> {
    let mut corrected = text.to_string();
    let mut count = 0;

    for misspelling in overlay.misspellings() {
        let Some(top) = misspelling.suggestions.first() else {
            continue;
        };
        corrected = replace_word(&corrected, &misspelling.word, top, scope)?.0;
        count += 1;
    }

    Ok((corrected, count))
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_only() {
        let (text, count) =
            replace_word("Helo Helo", "Helo", "Hello", ReplaceScope::FirstIgnoreCase).unwrap();
        assert_eq!(text, "Hello Helo");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_first_ignores_case() {
        let (text, _) =
            replace_word("helo Helo", "Helo", "Hello", ReplaceScope::FirstIgnoreCase).unwrap();
        assert_eq!(text, "Hello Helo");

        let (text, _) =
            replace_word("helo Helo", "Helo", "Hello", ReplaceScope::FirstMatchCase).unwrap();
        assert_eq!(text, "helo Hello");
    }

    #[test]
    fn test_all_occurrences_match_case() {
        let (text, count) =
            replace_word("tst, tst and Tst", "tst", "test", ReplaceScope::AllMatchCase).unwrap();
        assert_eq!(text, "test, test and Tst");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_whole_words_only() {
        let (text, count) =
            replace_word("concat cat cats", "cat", "dog", ReplaceScope::AllIgnoreCase).unwrap();
        assert_eq!(text, "concat dog cats");
        assert_eq!(count, 1);

        let (text, _) =
            replace_word("teh_var teh", "teh", "the", ReplaceScope::FirstIgnoreCase).unwrap();
        assert_eq!(text, "teh_var the");
    }

    #[test]
    fn test_literal_word_and_replacement() {
        let (text, count) =
            replace_word("a.b axb", "a.b", "$0 $1", ReplaceScope::AllMatchCase).unwrap();
        assert_eq!(text, "$0 $1 axb");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_no_match() {
        let (text, count) = replace_word("hello", "world", "x", ReplaceScope::AllMatchCase).unwrap();
        assert_eq!(text, "hello");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_correct_all_in_overlay_order() {
        let mut overlay = Overlay::new();
        overlay.push_misspelling("Ths", vec!["This".to_string(), "Thus".to_string()]);
        overlay.push_text(" is a ");
        overlay.push_misspelling("tst", vec!["test".to_string()]);
        overlay.push_text(" ");
        overlay.push_misspelling("xyzzy", Vec::new());

        let (text, count) =
            correct_all("Ths is a tst xyzzy", &overlay, ReplaceScope::AllMatchCase).unwrap();
        assert_eq!(text, "This is a test xyzzy");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_scope_config_names() {
        let scope: ReplaceScope = serde_json::from_str("\"first-ignore-case\"").unwrap();
        assert_eq!(scope, ReplaceScope::FirstIgnoreCase);
        assert!(!scope.is_global());
        assert!(ReplaceScope::AllMatchCase.is_global());
        assert!(!ReplaceScope::AllMatchCase.ignores_case());
    }
}
