//! SQL word lookup used by the tokenizer and the statement scanner.
//!
//! Keywords and function names are matched case-insensitively via
//! `from_lower` using a pre-lower-cased string slice. The lookup table is
//! derived from [`SQL_TOKENS`] so it cannot drift from the vocabulary.

use crate::sql::token_kind::*;
use crate::*;
use std::{collections::HashMap, sync::LazyLock};

/// Keywords that end the table list of a `FROM` clause.
pub const CLAUSE_TERMINATORS: [TokenType; 7] = [WHERE, GROUP, HAVING, ORDER, LIMIT, OFFSET, UNION];

static WORDS: LazyLock<HashMap<String, TokenType>> = LazyLock::new(|| {
    SQL_TOKENS
        .iter()
        .enumerate()
        .filter(|(_, token)| token.class.is_word())
        .filter_map(|(id, token)| {
            token
                .literal
                .map(|literal| (unquote(literal).to_ascii_lowercase(), id as TokenType))
        })
        .collect()
});

/// Attempt to classify a *lower-cased* word slice into a keyword or function
/// token type. Returns `None` for plain identifiers.
///
/// NOTE: The caller is responsible for lower-casing the input.
pub fn from_lower(word: &str) -> Option<TokenType> {
    WORDS.get(word).copied()
}

/// Unquoted spellings of every token type of the given classes.
pub fn words_of(
    classes: impl Fn(TokenClass) -> bool,
) -> impl Iterator<Item = &'static str> {
    SQL_TOKENS
        .iter()
        .filter(move |token| classes(token.class))
        .filter_map(|token| token.literal.map(unquote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_words() {
        for (word, expected) in [
            ("select", SELECT),
            ("from", FROM),
            ("join", JOIN),
            ("where", WHERE),
            ("count", COUNT),
            ("substring", SUBSTRING),
        ] {
            assert_eq!(from_lower(word), Some(expected), "{word} should be recognized");
        }
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["foo", "bar", "users", "SELECT", "random"] {
            assert!(from_lower(w).is_none(), "{w} should NOT be recognized");
        }
    }

    #[test]
    fn keyword_and_function_words_are_disjoint() {
        let keywords = words_of(|class| class == TokenClass::Keyword).collect::<Vec<_>>();
        let functions = words_of(TokenClass::is_function).collect::<Vec<_>>();
        assert!(keywords.contains(&"SELECT"));
        assert!(functions.contains(&"AVG"));
        assert!(keywords.iter().all(|k| !functions.contains(k)));
    }
}
