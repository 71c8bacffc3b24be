//! The SQL language shipped with the engine.
//!
//! Modules:
//! - `token_kind` : Token types with their spelling and lexical class.
//! - `keyword`    : Case-insensitive word lookup derived from the token table.
//! - `token`      : Token struct pairing a token type with its source span.
//! - `tokenizer`  : Single pass O(n) lenient tokenizer.
//! - `rules`      : Grammar rules, the compiled [`SqlGrammar`] and the parser.
//! - `enrich`     : Turns rules reached at the cursor into column, table,
//!   value and function intents.
//!
//! [`SQL_AUTOCOMPLETE`] bundles all of it into the language descriptor the
//! engine runs on.
//!
//! Example:
//! ```rust
//! use qsuggest::{CursorPosition, sql::prelude::*};
//!
//! let (base, _) = SQL_AUTOCOMPLETE
//!     .subject("SELECT * FROM orders WHERE status = ", CursorPosition::new(1, 37))
//!     .parse_query()
//!     .unwrap();
//! assert_eq!(base.suggest_values_for_column.as_deref(), Some("status"));
//! ```

pub mod enrich;
pub mod keyword;
pub mod rules;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use enrich::enrich_sql;
pub use rules::{SQL, SqlGrammar, parse_sql};
pub use token::Token;
pub use tokenizer::tokenize;

use crate::*;
use std::sync::LazyLock;
use token_kind::*;

/// Language descriptor for SQL.
pub static SQL_AUTOCOMPLETE: LazyLock<AutocompleteData<SqlGrammar>> = LazyLock::new(|| {
    let grammar: &'static SqlGrammar = &SQL;
    let classes = |accept: fn(TokenClass) -> bool| {
        SQL_TOKENS
            .iter()
            .enumerate()
            .filter(move |(_, token)| accept(token.class))
            .map(|(id, _)| id as TokenType)
    };
    AutocompleteData {
        grammar,
        dictionary: TokenDictionary::new(grammar.vocabulary(), SPACE),
        ignored_tokens: classes(TokenClass::is_ignored).collect(),
        preferred_rules: [
            rules::RULE_TABLE_NAME,
            rules::RULE_COLUMN_NAME,
            rules::RULE_AGGREGATE_FUNCTION_NAME,
            rules::RULE_SCALAR_FUNCTION_NAME,
            rules::RULE_PREDICATE,
        ]
        .into(),
        parse: parse_sql,
        enrich: enrich_sql,
        symbols: SymbolTable::new(
            keyword::words_of(|class| class == TokenClass::Keyword),
            keyword::words_of(TokenClass::is_function),
        ),
    }
});

/// Convenience prelude re‑exporting the most commonly used items.
///
/// Import with:
/// `use qsuggest::sql::prelude::*;`
pub mod prelude {
    pub use super::{SQL, SQL_AUTOCOMPLETE, SqlGrammar, Token, parse_sql, tokenize};
    pub use crate::Grammar;
}
