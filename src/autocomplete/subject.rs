use crate::{sql::Token, *};
use std::collections::BTreeSet;

/// Builds the parse tree, reporting syntax errors to the listener.
pub type ParseFn<G> = fn(&G, &[Token], &mut ErrorListener) -> ParseNode;

/// Grammar-specific rule processing: `(base, rules, tokens, cursor token
/// index, cursor, query)`.
pub type EnrichFn = fn(
    AutocompleteResultBase,
    &CandidateRules,
    &[Token],
    usize,
    CursorPosition,
    &str,
) -> Result<AutocompleteResultBase>;

/// Everything the engine needs to know about one language. Built once and
/// shared read-only by every request.
pub struct AutocompleteData<G: 'static> {
    pub grammar: &'static G,
    pub dictionary: TokenDictionary,
    /// Token types never offered as keywords.
    pub ignored_tokens: BTreeSet<TokenType>,
    /// Rules reported with their call-stack context when reached.
    pub preferred_rules: BTreeSet<RuleId>,
    pub parse: ParseFn<G>,
    pub enrich: EnrichFn,
    pub symbols: SymbolTable,
}

impl<G: Grammar> AutocompleteData<G> {
    pub fn subject<'a>(&'a self, query: &'a str, cursor: CursorPosition) -> ParsingSubject<'a, G> {
        ParsingSubject {
            data: self,
            query,
            cursor,
            context: None,
        }
    }
}

/// One autocomplete request: a language, a query and a cursor.
pub struct ParsingSubject<'a, G: 'static> {
    data: &'a AutocompleteData<G>,
    query: &'a str,
    cursor: CursorPosition,
    context: Option<&'a ParseNode>,
}

impl<'a, G: Grammar> ParsingSubject<'a, G> {
    /// Restrict candidate collection to `context`, a node of a tree returned
    /// by an earlier [`parse_query`](Self::parse_query) on the same text.
    pub fn with_context(self, context: &'a ParseNode) -> Self {
        Self {
            context: Some(context),
            ..self
        }
    }

    pub fn query(&self) -> &str {
        self.query
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn data(&self) -> &AutocompleteData<G> {
        self.data
    }

    /// Tokenize, parse, locate the cursor and turn the candidates found there
    /// into intents. Returns them with the parse tree.
    ///
    /// Syntax errors end up in [`AutocompleteResultBase::errors`]; only a
    /// cursor outside the query, a collection failure or an unknown token type
    /// fail the call.
    pub fn parse_query(&self) -> Result<(AutocompleteResultBase, ParseNode)> {
        let data = self.data;
        let grammar = data.grammar;
        let space = data.dictionary.space();

        let mut listener = ErrorListener::new(self.cursor, space);
        let tokens = grammar.tokenize(self.query, &mut listener);
        let tree = (data.parse)(grammar, &tokens, &mut listener);

        let cursor_index = find_cursor_token_index(&tokens, self.cursor, space)
            .ok_or(Error::CursorNotFound(self.cursor))?;
        let candidates = CandidateCollector::new(
            grammar,
            &tokens,
            &data.ignored_tokens,
            &data.preferred_rules,
        )
        .collect(cursor_index, self.context)?;

        let mut base = AutocompleteResultBase::new(listener.into_errors());
        base.suggest_keywords = self.keywords(&candidates.tokens)?;
        let base = (data.enrich)(
            base,
            &candidates.rules,
            &tokens,
            cursor_index,
            self.cursor,
            self.query,
        )?;
        debug!(
            "{} keyword(s), {} syntax error(s) at {}",
            base.suggest_keywords.len(),
            base.errors.len(),
            self.cursor
        );
        Ok((base, tree))
    }

    /// Unquoted literal names of `token_types`; types without a fixed
    /// spelling are skipped.
    fn keywords(&self, token_types: &BTreeSet<TokenType>) -> Result<Vec<KeywordSuggestion>> {
        let vocabulary = self.data.grammar.vocabulary();
        let mut keywords = Vec::new();
        for &token_type in token_types {
            if let Some(literal) = vocabulary.literal_name(token_type)? {
                keywords.push(KeywordSuggestion::new(unquote(literal)));
            }
        }
        Ok(keywords)
    }
}
