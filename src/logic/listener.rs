use crate::{sql::Token, *};
use serde::Serialize;

/// A syntax error recorded while tokenizing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub offending_symbol: String,
    pub message: String,
}

/// Collects syntax errors without ever interrupting the caller.
///
/// Partial queries are the normal case while typing, so errors are data, not
/// failures.
#[derive(Debug, Clone)]
pub struct ErrorListener {
    errors: Vec<ParseError>,
    cursor: CursorPosition,
    space: TokenType,
}

impl ErrorListener {
    pub fn new(cursor: CursorPosition, space: TokenType) -> Self {
        Self {
            errors: Vec::new(),
            cursor,
            space,
        }
    }

    pub fn syntax_error(
        &mut self,
        offending: Option<&Token>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) {
        let message = message.into();
        if let Some(token) = offending.filter(|token| self.is_trailing_whitespace(token)) {
            trace!(
                "Whitespace at {}:{} past the cursor, ignored while editing: {message}",
                token.line, token.column
            );
        } else {
            debug!("Syntax error at {line}:{column}: {message}");
        }
        self.errors.push(ParseError {
            line,
            column,
            offending_symbol: offending
                .map(|token| token.display_text().to_string())
                .unwrap_or_default(),
            message,
        });
    }

    /// Whitespace at or after the cursor is expected mid-edit. Only reachable
    /// for grammars that do not hide whitespace from the parser.
    fn is_trailing_whitespace(&self, token: &Token) -> bool {
        token.token_type == self.space
            && (token.line, token.column + 1) >= (self.cursor.line, self.cursor.column)
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACE: TokenType = 7;
    const WORD: TokenType = 8;

    fn token(token_type: TokenType, text: &str, column: usize) -> Token {
        Token::new(token_type, text, column, 1, column, 0)
    }

    #[test]
    fn errors_accumulate_in_order() {
        let mut listener = ErrorListener::new(CursorPosition::new(1, 1), SPACE);
        listener.syntax_error(Some(&token(WORD, "FROM", 0)), 1, 0, "first");
        listener.syntax_error(None, 1, 5, "second");
        let messages = listener
            .errors()
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>();
        assert_eq!(messages, ["first", "second"]);
        assert_eq!(listener.errors()[0].offending_symbol, "FROM");
        assert_eq!(listener.errors()[1].offending_symbol, "");
    }

    #[test]
    fn trailing_whitespace_is_still_recorded() {
        let mut listener = ErrorListener::new(CursorPosition::new(1, 3), SPACE);
        let space = token(SPACE, " ", 4);
        assert!(listener.is_trailing_whitespace(&space));
        listener.syntax_error(Some(&space), 1, 4, "extraneous input");
        assert_eq!(listener.into_errors().len(), 1);
    }

    #[test]
    fn whitespace_before_cursor_is_not_trailing() {
        let listener = ErrorListener::new(CursorPosition::new(1, 10), SPACE);
        assert!(!listener.is_trailing_whitespace(&token(SPACE, " ", 2)));
        assert!(!listener.is_trailing_whitespace(&token(WORD, "x", 12)));
    }
}
