//! Token model tying a token type to its source span.
//!
//! A `Token` carries its type id, its text, byte offsets into the original
//! query and the (line, column) where it starts. Offsets let higher-level logic
//! slice the original query; positions let the cursor locator work in editor
//! coordinates.
use crate::*;

/// A lexical token with its inclusive start and exclusive end byte offsets.
///
/// Invariants:
/// - `end >= start`
/// - `[start, end)` is a valid slice range for the original input
/// - `line` is 1-based, `column` is a 0-based character column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    /// Position in the token stream.
    pub index: usize,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        text: impl Into<String>,
        start: usize,
        line: usize,
        column: usize,
        index: usize,
    ) -> Self {
        let text = text.into();
        Self {
            token_type,
            end: start + text.len(),
            text,
            start,
            line,
            column,
            index,
        }
    }

    /// Byte length of this token (`end - start`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    /// Returns true if the byte offset lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `offset == end` returns false.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// `(line, column)` of the first character.
    pub fn start_position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// `(line, column)` just past the last character.
    pub fn end_position(&self) -> (usize, usize) {
        match self.text.rfind('\n') {
            Some(newline) => (
                self.line + self.text.matches('\n').count(),
                self.text[newline + 1..].chars().count(),
            ),
            None => (self.line, self.column + self.text.chars().count()),
        }
    }

    /// Typing right after this token would continue it.
    pub fn is_extendable(&self) -> bool {
        self.text
            .chars()
            .next_back()
            .is_none_or(|c| c.is_alphanumeric() || c == '_')
    }

    /// Text used in error messages; EOF has none of its own.
    pub fn display_text(&self) -> &str {
        if self.token_type == EOF {
            "<EOF>"
        } else {
            &self.text
        }
    }
}
