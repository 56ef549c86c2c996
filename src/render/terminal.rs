use crate::render::{Overlay, Segment};
use colored::*;

/// Render the overlay as terminal text with misspellings highlighted.
///
/// Without colour, misspellings are wrapped in brackets instead.
pub fn highlight(overlay: &Overlay, colored_output: bool) -> String {
    overlay
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Text { text } => text.clone(),
            Segment::Misspelled(misspelling) if colored_output => {
                misspelling.word.red().bold().underline().to_string()
            }
            Segment::Misspelled(misspelling) => format!("[{}]", misspelling.word),
        })
        .collect()
}

/// One line per misspelling: the word followed by its suggestions
pub fn describe(word: &str, suggestions: &[String], colored_output: bool) -> String {
    if suggestions.is_empty() {
        return if colored_output {
            format!("{} {}", word.red().bold(), "(no suggestions)".dimmed())
        } else {
            format!("{} (no suggestions)", word)
        };
    }

    if colored_output {
        let suggestions = suggestions
            .iter()
            .map(|s| s.green().to_string())
            .collect::<Vec<_>>()
            .join(&", ".dimmed().to_string());
        format!("{} {} {}", word.red().bold(), "→".dimmed(), suggestions)
    } else {
        format!("{} → {}", word, suggestions.join(", "))
    }
}
