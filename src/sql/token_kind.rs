//! Token types of the SQL grammar.
//!
//! Every token type gets a dense numeric id (id 0 is [`EOF`](crate::EOF)), a
//! symbolic name, an optional literal spelling and a [`TokenClass`]. The
//! table is the single source for the vocabulary, the keyword lookup, the
//! ignored-token set and the keyword/function classification sets, so a
//! word can only ever be one of keyword or function.

use crate::*;

/// Lexical class of a token type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Eof,
    Keyword,
    AggregateFunction,
    ScalarFunction,
    Punctuation,
    Operator,
    Identifier,
    Literal,
    Whitespace,
    Error,
}

impl TokenClass {
    pub fn is_function(self) -> bool {
        matches!(
            self,
            TokenClass::AggregateFunction | TokenClass::ScalarFunction
        )
    }

    /// Spelled as a word the tokenizer recognizes case-insensitively.
    pub fn is_word(self) -> bool {
        self == TokenClass::Keyword || self.is_function()
    }

    /// Never offered as a keyword suggestion.
    pub fn is_ignored(self) -> bool {
        matches!(
            self,
            TokenClass::Eof
                | TokenClass::Punctuation
                | TokenClass::Operator
                | TokenClass::Whitespace
                | TokenClass::Error
        )
    }
}

/// Row of the token table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlToken {
    pub symbolic: &'static str,
    pub literal: Option<&'static str>,
    pub class: TokenClass,
}

macro_rules! sql_tokens {
    (@literal $name:ident Keyword) => { Some(concat!("'", stringify!($name), "'")) };
    (@literal $name:ident AggregateFunction) => { Some(concat!("'", stringify!($name), "'")) };
    (@literal $name:ident ScalarFunction) => { Some(concat!("'", stringify!($name), "'")) };
    (@literal $name:ident $class:ident $literal:literal) => { Some($literal) };
    (@literal $name:ident $class:ident) => { None };
    ($($name:ident: $class:ident $(= $literal:literal)?),* $(,)?) => {
        #[allow(non_camel_case_types, clippy::upper_case_acronyms, dead_code)]
        #[repr(u16)]
        enum Ordinal {
            EndOfFile,
            $($name),*
        }

        $(pub const $name: TokenType = Ordinal::$name as TokenType;)*

        /// Every token type, indexed by id.
        pub const SQL_TOKENS: &[SqlToken] = &[
            SqlToken {
                symbolic: "EOF",
                literal: None,
                class: TokenClass::Eof,
            },
            $(SqlToken {
                symbolic: stringify!($name),
                literal: sql_tokens!(@literal $name $class $($literal)?),
                class: TokenClass::$class,
            },)*
        ];
    };
}

sql_tokens! {
    SELECT: Keyword,
    DESCRIBE: Keyword,
    SHOW: Keyword,
    DISTINCT: Keyword,
    ALL: Keyword,
    FROM: Keyword,
    WHERE: Keyword,
    GROUP: Keyword,
    BY: Keyword,
    HAVING: Keyword,
    ORDER: Keyword,
    ASC: Keyword,
    DESC: Keyword,
    NULLS: Keyword,
    FIRST: Keyword,
    LAST: Keyword,
    LIMIT: Keyword,
    OFFSET: Keyword,
    AS: Keyword,
    JOIN: Keyword,
    INNER: Keyword,
    LEFT: Keyword,
    RIGHT: Keyword,
    OUTER: Keyword,
    CROSS: Keyword,
    ON: Keyword,
    UNION: Keyword,
    AND: Keyword,
    OR: Keyword,
    NOT: Keyword,
    IN: Keyword,
    IS: Keyword,
    NULL: Keyword,
    LIKE: Keyword,
    BETWEEN: Keyword,
    TRUE: Keyword,
    FALSE: Keyword,
    CASE: Keyword,
    WHEN: Keyword,
    THEN: Keyword,
    ELSE: Keyword,
    END: Keyword,
    TABLES: Keyword,
    COLUMNS: Keyword,
    AVG: AggregateFunction,
    COUNT: AggregateFunction,
    MAX: AggregateFunction,
    MIN: AggregateFunction,
    SUM: AggregateFunction,
    ABS: ScalarFunction,
    CEIL: ScalarFunction,
    FLOOR: ScalarFunction,
    ROUND: ScalarFunction,
    SQRT: ScalarFunction,
    CONCAT: ScalarFunction,
    LENGTH: ScalarFunction,
    LOWER: ScalarFunction,
    UPPER: ScalarFunction,
    SUBSTRING: ScalarFunction,
    TRIM: ScalarFunction,
    COALESCE: ScalarFunction,
    IFNULL: ScalarFunction,
    NOW: ScalarFunction,
    STAR: Operator = "'*'",
    SLASH: Operator = "'/'",
    MODULE: Operator = "'%'",
    PLUS: Operator = "'+'",
    MINUS: Operator = "'-'",
    EQUAL: Operator = "'='",
    NOT_EQUAL: Operator = "'!='",
    LESS: Operator = "'<'",
    LESS_EQUAL: Operator = "'<='",
    GREATER: Operator = "'>'",
    GREATER_EQUAL: Operator = "'>='",
    COMMA: Punctuation = "','",
    DOT: Punctuation = "'.'",
    LR_BRACKET: Punctuation = "'('",
    RR_BRACKET: Punctuation = "')'",
    SEMI: Punctuation = "';'",
    ID: Identifier,
    BACKTICK_QUOTE_ID: Identifier,
    DOUBLE_QUOTE_ID: Identifier,
    STRING_LITERAL: Literal,
    DECIMAL_LITERAL: Literal,
    REAL_LITERAL: Literal,
    SPACE: Whitespace,
    ERROR_RECOGNITION: Error,
}

/// Table row for `token_type`, if the grammar defines it.
pub fn sql_token(token_type: TokenType) -> Option<&'static SqlToken> {
    SQL_TOKENS.get(token_type as usize)
}

pub fn is_identifier(token_type: TokenType) -> bool {
    matches!(token_type, ID | BACKTICK_QUOTE_ID | DOUBLE_QUOTE_ID)
}

pub fn is_comparison(token_type: TokenType) -> bool {
    matches!(
        token_type,
        EQUAL | NOT_EQUAL | LESS | LESS_EQUAL | GREATER | GREATER_EQUAL
    )
}

/// Tokens that can stand for a single value in a list.
pub fn is_value(token_type: TokenType) -> bool {
    is_identifier(token_type)
        || matches!(
            token_type,
            STRING_LITERAL | DECIMAL_LITERAL | REAL_LITERAL | TRUE | FALSE | NULL
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_match_the_table() {
        assert_eq!(sql_token(EOF).map(|t| t.symbolic), Some("EOF"));
        assert_eq!(sql_token(SELECT).map(|t| t.symbolic), Some("SELECT"));
        assert_eq!(
            sql_token(ERROR_RECOGNITION).map(|t| t.symbolic),
            Some("ERROR_RECOGNITION")
        );
        assert_eq!(SQL_TOKENS.len(), ERROR_RECOGNITION as usize + 1);
    }

    #[test]
    fn statement_starts_come_first() {
        assert!(SELECT < DESCRIBE && DESCRIBE < SHOW && SHOW < DISTINCT);
    }

    #[test]
    fn words_carry_quoted_literals() {
        assert_eq!(sql_token(FROM).and_then(|t| t.literal), Some("'FROM'"));
        assert_eq!(sql_token(COUNT).and_then(|t| t.literal), Some("'COUNT'"));
        assert_eq!(sql_token(STAR).and_then(|t| t.literal), Some("'*'"));
        assert_eq!(sql_token(ID).and_then(|t| t.literal), None);
    }

    #[test]
    fn classification_helpers() {
        assert!(is_identifier(BACKTICK_QUOTE_ID));
        assert!(!is_identifier(STRING_LITERAL));
        assert!(is_comparison(LESS_EQUAL));
        assert!(!is_comparison(IN));
        assert!(is_value(STRING_LITERAL));
        assert!(!is_value(COMMA));
        assert!(TokenClass::Punctuation.is_ignored());
        assert!(!TokenClass::Keyword.is_ignored());
        assert!(TokenClass::ScalarFunction.is_word());
    }
}
