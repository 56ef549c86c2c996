pub mod html;
pub mod terminal;

use serde::Serialize;

/// An unknown word together with its ranked suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Misspelling {
    pub word: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Known words and separators, emitted verbatim
    Text { text: String },
    Misspelled(Misspelling),
}

/// Checked text in display order, ready to be drawn over the input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub segments: Vec<Segment>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append verbatim text, merging with a preceding text segment
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Text { text: last }) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text {
                text: text.to_string(),
            });
        }
    }

    pub fn push_misspelling(&mut self, word: &str, suggestions: Vec<String>) {
        self.segments.push(Segment::Misspelled(Misspelling {
            word: word.to_string(),
            suggestions,
        }));
    }

    /// Misspellings in the order they appear
    pub fn misspellings(&self) -> impl Iterator<Item = &Misspelling> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Misspelled(misspelling) => Some(misspelling),
            Segment::Text { .. } => None,
        })
    }

    pub fn error_count(&self) -> usize {
        self.misspellings().count()
    }
}

pub fn stats_line(errors: usize, words: usize) -> String {
    format!("Errors: {} | Words: {}", errors, words)
}
