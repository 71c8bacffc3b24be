//! Seams between the autocomplete engine and a concrete grammar.
//!
//! The engine never looks at SQL directly. A grammar hands it a token stream,
//! a rule automaton to simulate and a vocabulary to turn token types back into
//! text. Everything here is grammar agnostic; `crate::sql` provides the one
//! grammar shipped with the crate.

use crate::{sql::Token, *};
use std::collections::BTreeMap;

/// Numeric token-type id assigned by a grammar.
pub type TokenType = u16;
/// Numeric rule id assigned by a grammar.
pub type RuleId = u16;

/// Token type of the zero-length token closing every stream.
pub const EOF: TokenType = 0;

/// A grammar able to drive autocomplete.
pub trait Grammar {
    /// Split `text` into tokens, reporting lexical errors to `listener`.
    ///
    /// Every character of the input belongs to exactly one token and the
    /// stream always ends with an [`EOF`] token.
    fn tokenize(&self, text: &str, listener: &mut ErrorListener) -> Vec<Token>;

    fn vocabulary(&self) -> &Vocabulary;

    /// Rule automaton used by the parser and the candidate collector.
    fn atn(&self) -> &Atn;

    /// True for token types the parser never sees (whitespace, broken lexemes).
    fn is_hidden(&self, token_type: TokenType) -> bool;
}

/// Literal and symbolic names of one token type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyEntry {
    /// Surface form including its quotes (`'SELECT'`); `None` for token types
    /// without a fixed spelling such as identifiers and literals.
    pub literal: Option<&'static str>,
    pub symbolic: &'static str,
}

/// Token-type id → names, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    pub fn new(entries: impl IntoIterator<Item = VocabularyEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entry(&self, token_type: TokenType) -> Option<&VocabularyEntry> {
        self.entries.get(token_type as usize)
    }

    /// Literal name of `token_type`.
    ///
    /// `Ok(None)` means the type exists but has no fixed spelling. A type the
    /// vocabulary does not know is an error.
    pub fn literal_name(&self, token_type: TokenType) -> Result<Option<&'static str>> {
        self.entry(token_type)
            .map(|entry| entry.literal)
            .ok_or(Error::Vocabulary(token_type))
    }

    pub fn symbolic_name(&self, token_type: TokenType) -> Option<&'static str> {
        self.entry(token_type).map(|entry| entry.symbolic)
    }

    /// Human readable name used in syntax error messages.
    pub fn display_name(&self, token_type: TokenType) -> String {
        if token_type == EOF {
            return "<EOF>".to_string();
        }
        match self.entry(token_type) {
            Some(VocabularyEntry {
                literal: Some(literal),
                ..
            }) => literal.to_string(),
            Some(entry) => entry.symbolic.to_string(),
            None => token_type.to_string(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenType, &VocabularyEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, entry)| (id as TokenType, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Symbolic token name → token-type id, with the whitespace type singled out.
#[derive(Debug, Clone)]
pub struct TokenDictionary {
    space: TokenType,
    symbols: BTreeMap<&'static str, TokenType>,
}

impl TokenDictionary {
    pub fn new(vocabulary: &Vocabulary, space: TokenType) -> Self {
        Self {
            space,
            symbols: vocabulary
                .iter()
                .map(|(id, entry)| (entry.symbolic, id))
                .collect(),
        }
    }

    pub fn space(&self) -> TokenType {
        self.space
    }

    pub fn get(&self, symbolic: &str) -> Option<TokenType> {
        self.symbols.get(symbolic).copied()
    }
}

/// Strip one pair of matching `'`, `"` or `` ` `` quotes.
pub fn unquote(text: &str) -> &str {
    for quote in ['\'', '"', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// A node of the parse tree, bounded by inclusive token indices.
///
/// A node can be handed back to the collector as the scoping context of a
/// later request on the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    pub rule: RuleId,
    pub start: usize,
    pub stop: usize,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub fn new(rule: RuleId, start: usize, stop: usize) -> Self {
        Self {
            rule,
            start,
            stop,
            children: Vec::new(),
        }
    }

    pub fn contains(&self, token_index: usize) -> bool {
        self.start <= token_index && token_index <= self.stop
    }

    /// Direct child whose span contains `token_index`.
    pub fn child_at(&self, token_index: usize) -> Option<&ParseNode> {
        self.children.iter().find(|child| child.contains(token_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new([
            VocabularyEntry {
                literal: None,
                symbolic: "EOF",
            },
            VocabularyEntry {
                literal: Some("'SELECT'"),
                symbolic: "SELECT",
            },
            VocabularyEntry {
                literal: None,
                symbolic: "ID",
            },
            VocabularyEntry {
                literal: None,
                symbolic: "SPACE",
            },
        ])
    }

    #[test]
    fn literal_name_distinguishes_missing_literal_from_unknown_type() {
        let vocabulary = vocabulary();
        assert_eq!(vocabulary.literal_name(1).ok().flatten(), Some("'SELECT'"));
        assert_eq!(vocabulary.literal_name(2).ok(), Some(None));
        assert!(matches!(
            vocabulary.literal_name(42),
            Err(Error::Vocabulary(42))
        ));
    }

    #[test]
    fn display_names_prefer_literals() {
        let vocabulary = vocabulary();
        assert_eq!(vocabulary.display_name(EOF), "<EOF>");
        assert_eq!(vocabulary.display_name(1), "'SELECT'");
        assert_eq!(vocabulary.display_name(2), "ID");
    }

    #[test]
    fn dictionary_maps_symbolic_names() {
        let dictionary = TokenDictionary::new(&vocabulary(), 3);
        assert_eq!(dictionary.space(), 3);
        assert_eq!(dictionary.get("SPACE"), Some(3));
        assert_eq!(dictionary.get("SELECT"), Some(1));
        assert_eq!(dictionary.get("BLANK"), None);
    }

    #[rstest]
    #[case("'SELECT'", "SELECT")]
    #[case("`column`", "column")]
    #[case("\"name\"", "name")]
    #[case("plain", "plain")]
    #[case("'", "'")]
    #[case("'mixed`", "'mixed`")]
    fn unquote_strips_matching_pairs(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unquote(input), expected);
    }

    #[test]
    fn parse_node_child_lookup() {
        let mut root = ParseNode::new(0, 0, 9);
        root.children.push(ParseNode::new(1, 0, 3));
        root.children.push(ParseNode::new(1, 5, 8));
        assert_eq!(root.child_at(6).map(|c| c.start), Some(5));
        assert!(root.child_at(4).is_none());
    }
}
