use crate::*;
use std::collections::BTreeSet;

/// Keyword and function spellings of a grammar, used to type keyword
/// candidates.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    keywords: BTreeSet<&'static str>,
    functions: BTreeSet<&'static str>,
}

impl SymbolTable {
    pub fn new(
        keywords: impl IntoIterator<Item = &'static str>,
        functions: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self {
            keywords: keywords.into_iter().collect(),
            functions: functions.into_iter().collect(),
        }
    }

    /// Keyword set first, then function set, else plain text.
    pub fn classify(&self, literal: &str) -> SuggestionKind {
        let upper = literal.to_ascii_uppercase();
        if self.keywords.contains(upper.as_str()) {
            SuggestionKind::Keyword
        } else if self.functions.contains(upper.as_str()) {
            SuggestionKind::Function
        } else {
            SuggestionKind::Text
        }
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> {
        self.keywords.iter().copied()
    }

    pub fn functions(&self) -> impl Iterator<Item = &'static str> {
        self.functions.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SQL_AUTOCOMPLETE;
    use rstest::rstest;

    #[rstest]
    #[case("SELECT", SuggestionKind::Keyword)]
    #[case("from", SuggestionKind::Keyword)]
    #[case("COUNT", SuggestionKind::Function)]
    #[case("substring", SuggestionKind::Function)]
    #[case("orders", SuggestionKind::Text)]
    #[case("", SuggestionKind::Text)]
    fn classifies_sql_symbols(#[case] literal: &str, #[case] expected: SuggestionKind) {
        assert_eq!(SQL_AUTOCOMPLETE.symbols.classify(literal), expected);
    }

    #[test]
    fn no_symbol_is_both_keyword_and_function() {
        let symbols = &SQL_AUTOCOMPLETE.symbols;
        assert!(symbols.keywords().count() > 0);
        assert!(symbols.functions().count() > 0);
        assert!(symbols.keywords().all(|k| symbols.functions().all(|f| f != k)));
    }

    #[test]
    fn keyword_set_wins_when_tables_overlap() {
        let symbols = SymbolTable::new(["LEFT"], ["LEFT", "UPPER"]);
        assert_eq!(symbols.classify("left"), SuggestionKind::Keyword);
        assert_eq!(symbols.classify("upper"), SuggestionKind::Function);
    }
}
