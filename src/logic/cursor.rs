use crate::{sql::Token, *};
use serde::{Deserialize, Serialize};

/// Editor cursor; both coordinates are 1-based.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{line}:{column}")]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A selection in a single-line query, as flat character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    start: usize,
    end: Option<usize>,
}

impl Selection {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn range(&self) -> (usize, Option<usize>) {
        (self.start, self.end)
    }

    /// Completion happens at the start of the selection, on line 1.
    pub fn position(&self) -> CursorPosition {
        CursorPosition::new(1, self.start + 1)
    }
}

/// Index of the token completion applies to.
///
/// A caret inside a token, or right after one that typing would extend (a
/// word, a literal, the zero-length EOF), resolves to that token. A caret on
/// whitespace resolves to the next non-whitespace token: the spot where the
/// next word will land. `None` when the stream is empty or the caret lies
/// before the first token or past the end of input.
pub fn find_cursor_token_index(
    tokens: &[Token],
    cursor: CursorPosition,
    space: TokenType,
) -> Option<usize> {
    let first = tokens.first()?;
    if cursor.line == 0 || cursor.column == 0 {
        return None;
    }
    let caret = (cursor.line, cursor.column - 1);
    if caret < first.start_position() {
        return None;
    }

    let (index, token) = tokens.iter().enumerate().find(|(_, token)| {
        let start = token.start_position();
        let end = token.end_position();
        start <= caret && (caret < end || (caret == end && token.is_extendable()))
    })?;

    if token.token_type != space {
        return Some(index);
    }
    tokens[index + 1..]
        .iter()
        .position(|token| token.token_type != space)
        .map(|offset| index + 1 + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{SQL, token_kind::*};
    use rstest::rstest;

    fn tokens(query: &str) -> Vec<Token> {
        let mut listener = ErrorListener::new(CursorPosition::new(1, 1), SPACE);
        SQL.tokenize(query, &mut listener)
    }

    fn locate(query: &str, line: usize, column: usize) -> Option<(TokenType, String)> {
        let tokens = tokens(query);
        find_cursor_token_index(&tokens, CursorPosition::new(line, column), SPACE)
            .map(|index| (tokens[index].token_type, tokens[index].text.clone()))
    }

    #[rstest]
    #[case::empty_query("", 1, 1, Some((EOF, "")))]
    #[case::end_of_word("SELECT", 1, 7, Some((SELECT, "SELECT")))]
    #[case::inside_word("SELECT", 1, 3, Some((SELECT, "SELECT")))]
    #[case::after_trailing_space("SELECT * FROM ", 1, 15, Some((EOF, "")))]
    #[case::inside_whitespace_run("SELECT  FROM t", 1, 8, Some((FROM, "FROM")))]
    #[case::after_comma("SELECT col1, FROM orders", 1, 13, Some((FROM, "FROM")))]
    #[case::touching_identifier("SELECT * FROM ord", 1, 18, Some((ID, "ord")))]
    #[case::after_operator("a =", 1, 4, Some((EOF, "")))]
    #[case::second_line("SELECT *\nFROM t", 2, 5, Some((FROM, "FROM")))]
    #[case::line_start_after_newline("SELECT *\n", 2, 1, Some((EOF, "")))]
    #[case::past_end("SELECT", 1, 20, None)]
    #[case::line_past_end("SELECT", 3, 1, None)]
    #[case::zero_column("SELECT", 1, 0, None)]
    fn locates_cursor_token(
        #[case] query: &str,
        #[case] line: usize,
        #[case] column: usize,
        #[case] expected: Option<(TokenType, &str)>,
    ) {
        assert_eq!(
            locate(query, line, column),
            expected.map(|(token_type, text)| (token_type, text.to_string()))
        );
    }

    #[test]
    fn empty_stream_has_no_cursor_token() {
        assert_eq!(
            find_cursor_token_index(&[], CursorPosition::new(1, 1), SPACE),
            None
        );
    }

    #[test]
    fn selection_maps_to_first_line() {
        let selection = Selection::new(14, Some(14));
        assert_eq!(selection.position(), CursorPosition::new(1, 15));
        assert_eq!(selection.range(), (14, Some(14)));
    }
}
