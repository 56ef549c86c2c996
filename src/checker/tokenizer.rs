#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Separator,
}

/// A maximal run of either word or separator characters, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Letters, digits, underscore and apostrophe make up words
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '\''
}

/// Split text into alternating word and separator runs.
///
/// Concatenating the tokens reproduces `text` exactly.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<TokenKind> = None;

    for (idx, ch) in text.char_indices() {
        let kind = if is_word_char(ch) {
            TokenKind::Word
        } else {
            TokenKind::Separator
        };

        match current {
            Some(prev) if prev == kind => {}
            Some(prev) => {
                tokens.push(Token {
                    kind: prev,
                    text: &text[start..idx],
                });
                start = idx;
                current = Some(kind);
            }
            None => current = Some(kind),
        }
    }

    if let Some(kind) = current {
        tokens.push(Token {
            kind,
            text: &text[start..],
        });
    }

    tokens
}
