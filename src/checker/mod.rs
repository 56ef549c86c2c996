pub mod session;
pub mod tokenizer;

use crate::engine::SpellEngine;
use crate::render::Overlay;
use crate::CheckResult;
use session::Session;
use tokenizer::tokenize;

/// Check `text` and build the overlay.
///
/// Unknown words get at most `max_suggestions` suggestions from the engine.
pub fn check(
    text: &str,
    engine: &dyn SpellEngine,
    session: &Session,
    max_suggestions: usize,
) -> CheckResult {
    let mut overlay = Overlay::new();

    for token in tokenize(text) {
        if !token.is_word() || session.is_known(token.text, engine) {
            overlay.push_text(token.text);
            continue;
        }

        let mut suggestions = engine.suggest(token.text);
        suggestions.truncate(max_suggestions);
        overlay.push_misspelling(token.text, suggestions);
    }

    let error_count = overlay.error_count();
    let word_count = word_count(text);
    tracing::debug!(error_count, word_count, "text checked");

    CheckResult {
        overlay,
        error_count,
        word_count,
    }
}

/// Whitespace-delimited chunks; punctuation stays attached to its word
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
