use crate::sql::{keyword, token::Token, token_kind::*};
use crate::*;
use std::{iter::Peekable, str::CharIndices};

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Scope / Intent:
/// - Designed for IDE autocomplete & cursor-aware suggestions.
/// - Accepts incomplete / syntactically invalid SQL (e.g. `SELECT FROM`, `WHERE a = 'unterminated`).
///
/// Behavior:
/// - Whitespace runs (newlines included) become one `SPACE` token each.
/// - Word runs are looked up case-insensitively as keywords or function names,
///   falling back to `ID` with the original casing.
/// - `'…'` strings (with `''` escapes), `` `…` `` and `"…"` quoted identifiers.
/// - Unterminated quotes and unknown characters become `ERROR_RECOGNITION`
///   tokens and are reported to the listener.
/// - The stream always ends with a zero-length `EOF` token.
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(sql: &str, listener: &mut ErrorListener) -> Vec<Token> {
    let mut scanner = Scanner::new(sql);
    let mut out = Vec::new();

    while let Some(c) = scanner.peek() {
        let (start, line, column) = (scanner.offset(), scanner.line, scanner.column);
        let token_type = scanner.scan(c, start);
        let token = Token::new(
            token_type,
            &sql[start..scanner.offset()],
            start,
            line,
            column,
            out.len(),
        );
        if token_type == ERROR_RECOGNITION {
            listener.syntax_error(
                Some(&token),
                line,
                column,
                format!("token recognition error at: '{}'", token.text),
            );
        }
        out.push(token);
    }

    out.push(Token::new(
        EOF,
        "",
        sql.len(),
        scanner.line,
        scanner.column,
        out.len(),
    ));
    out
}

struct Scanner<'a> {
    sql: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    fn new(sql: &'a str) -> Self {
        Self {
            sql,
            chars: sql.char_indices().peekable(),
            line: 1,
            column: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(offset, _)| offset)
            .unwrap_or(self.sql.len())
    }

    fn bump(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn bump_while(&mut self, accept: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&accept) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        let matched = self.peek() == Some(expected);
        if matched {
            self.bump();
        }
        matched
    }

    /// Consume one token starting with `first` at byte `start`.
    fn scan(&mut self, first: char, start: usize) -> TokenType {
        self.bump();
        match first {
            c if c.is_whitespace() => {
                self.bump_while(char::is_whitespace);
                SPACE
            }
            c if c.is_alphabetic() || c == '_' => {
                self.bump_while(|c| c.is_alphanumeric() || c == '_');
                let word = &self.sql[start..self.offset()];
                keyword::from_lower(&word.to_lowercase()).unwrap_or(ID)
            }
            c if c.is_ascii_digit() => {
                self.bump_while(|c| c.is_ascii_digit());
                if self.eat('.') {
                    self.bump_while(|c| c.is_ascii_digit());
                    REAL_LITERAL
                } else {
                    DECIMAL_LITERAL
                }
            }
            '\'' => self.quoted('\'', STRING_LITERAL),
            '"' => self.quoted('"', DOUBLE_QUOTE_ID),
            '`' => self.quoted('`', BACKTICK_QUOTE_ID),
            ',' => COMMA,
            '.' => DOT,
            '(' => LR_BRACKET,
            ')' => RR_BRACKET,
            ';' => SEMI,
            '*' => STAR,
            '/' => SLASH,
            '%' => MODULE,
            '+' => PLUS,
            '-' => MINUS,
            '=' => EQUAL,
            '!' if self.eat('=') => NOT_EQUAL,
            '<' if self.eat('=') => LESS_EQUAL,
            '<' if self.eat('>') => NOT_EQUAL,
            '<' => LESS,
            '>' if self.eat('=') => GREATER_EQUAL,
            '>' => GREATER,
            _ => ERROR_RECOGNITION,
        }
    }

    /// Body of a quoted lexeme; a doubled quote is an escaped quote.
    fn quoted(&mut self, quote: char, token_type: TokenType) -> TokenType {
        while let Some(c) = self.bump() {
            if c == quote && !self.eat(quote) {
                return token_type;
            }
        }
        ERROR_RECOGNITION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lex(sql: &str) -> (Vec<Token>, Vec<ParseError>) {
        let mut listener = ErrorListener::new(CursorPosition::new(1, 1), SPACE);
        let tokens = tokenize(sql, &mut listener);
        (tokens, listener.into_errors())
    }

    fn types(sql: &str) -> Vec<TokenType> {
        lex(sql).0.iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn basic_select_sequence() {
        assert_eq!(
            types("SELECT a, b FROM t"),
            vec![SELECT, SPACE, ID, COMMA, SPACE, ID, SPACE, FROM, SPACE, ID, EOF]
        );
    }

    #[test]
    fn preserves_case_for_identifiers() {
        let (toks, _) = lex("From MyTable");
        assert!(toks[0].is(FROM));
        assert_eq!(toks[0].text, "From");
        assert!(toks[2].is(ID));
        assert_eq!(toks[2].text, "MyTable");
    }

    #[test]
    fn every_character_is_covered() {
        let sql = "SELECT `a b`, 'it''s' FROM t WHERE x <> 1.5;";
        let (toks, errors) = lex(sql);
        assert!(errors.is_empty());
        let joined = toks.iter().map(|t| t.text.as_str()).collect::<String>();
        assert_eq!(joined, sql);
        assert!(toks.windows(2).all(|w| w[0].end == w[1].start));
        assert_eq!(toks.last().map(|t| t.token_type), Some(EOF));
    }

    #[rstest]
    #[case("'it''s'", STRING_LITERAL)]
    #[case("`column.name`", BACKTICK_QUOTE_ID)]
    #[case("\"Quoted\"", DOUBLE_QUOTE_ID)]
    #[case("42", DECIMAL_LITERAL)]
    #[case("4.2", REAL_LITERAL)]
    #[case("count", COUNT)]
    #[case("<=", LESS_EQUAL)]
    #[case("<>", NOT_EQUAL)]
    #[case("!=", NOT_EQUAL)]
    #[case(">=", GREATER_EQUAL)]
    #[case("_private", ID)]
    fn single_lexemes(#[case] sql: &str, #[case] expected: TokenType) {
        assert_eq!(types(sql), vec![expected, EOF]);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let (toks, errors) = lex("SELECT 'abc FROM t");
        assert_eq!(
            toks.iter().map(|t| t.token_type).collect::<Vec<_>>(),
            vec![SELECT, SPACE, ERROR_RECOGNITION, EOF]
        );
        assert_eq!(toks[2].text, "'abc FROM t");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column, 7);
        assert!(errors[0].message.starts_with("token recognition error"));
    }

    #[test]
    fn unknown_character_is_reported() {
        let (toks, errors) = lex("a # b");
        assert!(toks[2].is(ERROR_RECOGNITION));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn tracks_lines_and_columns() {
        let (toks, _) = lex("SELECT *\n  FROM t");
        let from = toks.iter().find(|t| t.is(FROM)).expect("FROM token");
        assert_eq!((from.line, from.column), (2, 2));
        let eof = toks.last().expect("EOF token");
        assert_eq!((eof.line, eof.column), (2, 8));
        assert_eq!(eof.start, 17);
    }

    #[test]
    fn empty_input_is_just_eof() {
        let (toks, errors) = lex("");
        assert_eq!(toks.len(), 1);
        assert!(toks[0].is(EOF));
        assert!(errors.is_empty());
    }
}
