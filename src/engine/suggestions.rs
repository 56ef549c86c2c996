use crate::engine::dictionary::{capitalize, is_all_caps, is_capitalized, Dictionary};

/// Generate ranked spelling suggestions for `word`
pub fn generate(word: &str, dictionary: &Dictionary, max_suggestions: usize) -> Vec<String> {
    if word.is_empty() || max_suggestions == 0 {
        return Vec::new();
    }

    // Work on the lower-case form and restore the caller's casing at the end
    let base = if is_capitalized(word) || is_all_caps(word) {
        word.to_lowercase()
    } else {
        word.to_string()
    };

    let mut suggestions: Vec<String> = Vec::new();
    let push = |candidate: String, suggestions: &mut Vec<String>| {
        if candidate != base
            && candidate != word
            && dictionary.is_suggestible(&candidate)
            && !suggestions.contains(&candidate)
        {
            suggestions.push(candidate);
        }
    };

    // 1. Known replacement pairs (cheap and usually right)
    for candidate in replacement_candidates(&base, dictionary) {
        push(candidate, &mut suggestions);
    }

    // 2. Single edits over the TRY alphabet
    let mut single_edits: Vec<String> = edits1(&base, dictionary.try_chars())
        .into_iter()
        .filter_map(|candidate| dictionary.resolve(&candidate))
        .collect();
    // Keep the first letter when possible; people rarely mistype it
    let first = base.chars().next();
    single_edits.sort_by_key(|candidate| {
        candidate.chars().next().map(|c| c.to_lowercase().next()) != Some(first)
    });
    for candidate in single_edits {
        push(candidate, &mut suggestions);
    }

    // 3. Prefix scan within edit distance 2
    if suggestions.len() < max_suggestions {
        let char_count = base.chars().count();
        if char_count >= 3 {
            let prefix_len = if char_count >= 5 { 3 } else { 2 };
            let prefix: String = base.chars().take(prefix_len).collect();
            let mut candidates: Vec<(usize, String)> = dictionary
                .words_with_prefix(&prefix)
                .into_iter()
                .filter_map(|candidate| {
                    let distance = edit_distance(&base, &candidate);
                    (distance <= 2).then_some((distance, candidate))
                })
                .collect();
            candidates.sort_by_key(|(distance, _)| *distance);

            for (_, candidate) in candidates {
                push(candidate, &mut suggestions);
                if suggestions.len() >= max_suggestions {
                    break;
                }
            }
        }
    }

    suggestions.truncate(max_suggestions);
    suggestions
        .into_iter()
        .map(|suggestion| restore_case(word, suggestion))
        .collect()
}

/// Apply every REP pair at every position it matches
fn replacement_candidates(word: &str, dictionary: &Dictionary) -> Vec<String> {
    let mut candidates = Vec::new();

    for (from, to) in dictionary.replacements() {
        for (idx, _) in word.match_indices(from.as_str()) {
            let candidate = format!("{}{}{}", &word[..idx], to, &word[idx + from.len()..]);
            // Multi-word replacements need every part to be known
            let resolved: Option<Vec<String>> = candidate
                .split(' ')
                .map(|part| dictionary.resolve(part))
                .collect();
            if let Some(parts) = resolved {
                candidates.push(parts.join(" "));
            }
        }
    }

    candidates
}

/// All strings one deletion, transposition, replacement or insertion away
fn edits1(word: &str, alphabet: &[char]) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut edits = Vec::new();

    // Transpositions (swap adjacent)
    for i in 0..chars.len().saturating_sub(1) {
        let mut new_word = chars.clone();
        new_word.swap(i, i + 1);
        edits.push(new_word.iter().collect());
    }

    // Deletions
    for i in 0..chars.len() {
        let mut new_word = chars.clone();
        new_word.remove(i);
        edits.push(new_word.iter().collect());
    }

    // Replacements
    for i in 0..chars.len() {
        for &ch in alphabet {
            if chars[i] != ch {
                let mut new_word = chars.clone();
                new_word[i] = ch;
                edits.push(new_word.iter().collect());
            }
        }
    }

    // Insertions
    for i in 0..=chars.len() {
        for &ch in alphabet {
            let mut new_word = chars.clone();
            new_word.insert(i, ch);
            edits.push(new_word.iter().collect());
        }
    }

    edits
}

fn restore_case(original: &str, suggestion: String) -> String {
    if is_all_caps(original) && original.chars().count() > 1 {
        suggestion.to_uppercase()
    } else if is_capitalized(original) {
        capitalize(&suggestion)
    } else {
        suggestion
    }
}

/// Calculate Levenshtein distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            current[j + 1] = std::cmp::min(
                std::cmp::min(
                    previous[j + 1] + 1, // deletion
                    current[j] + 1,      // insertion
                ),
                previous[j] + cost, // substitution
            );
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
