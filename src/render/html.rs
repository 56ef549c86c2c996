//! HTML rendering of the overlay for a browser front-end.
//!
//! All user text is escaped before it is embedded, both in element content
//! and in attribute values.

use crate::render::{Misspelling, Overlay, Segment};
use std::fmt::Write;

/// Escape `& < > " '` for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn overlay_markup(overlay: &Overlay) -> String {
    let mut html = String::new();
    for segment in &overlay.segments {
        match segment {
            Segment::Text { text } => html.push_str(&escape(text)),
            Segment::Misspelled(misspelling) => write_misspelling(&mut html, misspelling),
        }
    }
    html
}

fn write_misspelling(html: &mut String, misspelling: &Misspelling) {
    let word = escape(&misspelling.word);

    // Writing to a String cannot fail
    let _ = write!(
        html,
        r#"<span class="incorrect" tabindex="0">{word}<div class="suggestion-popup">"#
    );

    if misspelling.suggestions.is_empty() {
        html.push_str(r#"<div class="no-suggestions">No suggestions</div>"#);
    } else {
        for suggestion in &misspelling.suggestions {
            let suggestion = escape(suggestion);
            let _ = write!(
                html,
                r#"<button class="suggestion-item" data-word="{word}" data-suggestion="{suggestion}">{suggestion}</button>"#
            );
        }
    }

    let _ = write!(
        html,
        concat!(
            r#"<div class="popup-divider"></div>"#,
            r#"<button class="popup-action" data-action="add" data-word="{word}">Add to Dictionary</button>"#,
            r#"<button class="popup-action" data-action="ignore" data-word="{word}">Ignore Once</button>"#,
            "</div></span>"
        ),
        word = word
    );
}

pub fn stats_markup(errors: usize, words: usize) -> String {
    format!(
        "<span>Errors: {}</span> | <span>Words: {}</span>",
        errors, words
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_known_text_is_escaped_verbatim() {
        let mut overlay = Overlay::new();
        overlay.push_text("1 < 2 & <script>");
        assert_eq!(overlay_markup(&overlay), "1 &lt; 2 &amp; &lt;script&gt;");
    }

    #[test]
    fn test_misspelling_markup() {
        let mut overlay = Overlay::new();
        overlay.push_misspelling("tst", vec!["test".to_string(), "tat".to_string()]);
        let html = overlay_markup(&overlay);

        assert!(html.starts_with(r#"<span class="incorrect" tabindex="0">tst<div class="suggestion-popup">"#));
        assert!(html.contains(
            r#"<button class="suggestion-item" data-word="tst" data-suggestion="test">test</button>"#
        ));
        assert!(html.contains(r#"data-suggestion="tat""#));
        assert!(html.contains(r#"data-action="add" data-word="tst">Add to Dictionary</button>"#));
        assert!(html.contains(r#"data-action="ignore" data-word="tst">Ignore Once</button>"#));
        assert!(html.ends_with("</div></span>"));
        assert!(!html.contains("no-suggestions"));
    }

    #[test]
    fn test_no_suggestions_placeholder() {
        let mut overlay = Overlay::new();
        overlay.push_misspelling("xyzzy", Vec::new());
        let html = overlay_markup(&overlay);
        assert!(html.contains(r#"<div class="no-suggestions">No suggestions</div>"#));
        assert!(!html.contains("suggestion-item"));
    }

    #[test]
    fn test_attribute_injection_is_escaped() {
        let mut overlay = Overlay::new();
        overlay.push_misspelling("o'neil\"", vec!["x\" onclick=\"alert(1)".to_string()]);
        let html = overlay_markup(&overlay);
        assert!(!html.contains(r#"" onclick=""#));
        assert!(html.contains("x&quot; onclick=&quot;alert(1)"));
        assert!(html.contains("o&#39;neil&quot;"));
    }

    #[test]
    fn test_stats_markup() {
        assert_eq!(
            stats_markup(0, 0),
            "<span>Errors: 0</span> | <span>Words: 0</span>"
        );
    }
}
