use crate::{sql::Token, *};
use std::collections::{BTreeMap, BTreeSet};

/// Where a preferred rule was found on the call stack at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleContext {
    /// First token the rule invocation covers.
    pub start_token_index: usize,
    /// Rules enclosing the invocation, outermost first.
    pub rule_list: Vec<RuleId>,
}

pub type CandidateRules = BTreeMap<RuleId, Vec<RuleContext>>;

/// Viable token types and preferred rules at one token index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatesCollection {
    pub tokens: BTreeSet<TokenType>,
    pub rules: CandidateRules,
}

/// Simulates a grammar up to the cursor token and reports what may come next.
///
/// Tokens the grammar rejects before the cursor are skipped, so an earlier
/// syntax error does not wipe out the suggestions after it.
pub struct CandidateCollector<'a, G: ?Sized> {
    grammar: &'a G,
    tokens: &'a [Token],
    ignored_tokens: &'a BTreeSet<TokenType>,
    preferred_rules: &'a BTreeSet<RuleId>,
}

impl<'a, G: Grammar + ?Sized> CandidateCollector<'a, G> {
    pub fn new(
        grammar: &'a G,
        tokens: &'a [Token],
        ignored_tokens: &'a BTreeSet<TokenType>,
        preferred_rules: &'a BTreeSet<RuleId>,
    ) -> Self {
        Self {
            grammar,
            tokens,
            ignored_tokens,
            preferred_rules,
        }
    }

    pub fn collect(
        &self,
        cursor_token_index: usize,
        scope: Option<&ParseNode>,
    ) -> Result<CandidatesCollection> {
        if cursor_token_index >= self.tokens.len() {
            return Err(Error::Collection(format!(
                "cursor token index {cursor_token_index} is outside a stream of {} tokens",
                self.tokens.len()
            )));
        }
        let atn = self.grammar.atn();
        let (rule, start) = match scope {
            Some(node)
                if node.start <= cursor_token_index
                    && cursor_token_index <= self.position(node.stop + 1, self.tokens.len() - 1) =>
            {
                (node.rule, node.start)
            }
            Some(node) => {
                return Err(Error::Collection(format!(
                    "cursor token index {cursor_token_index} is outside the scoping rule span {}..={}",
                    node.start, node.stop
                )));
            }
            None => (atn.root(), 0),
        };

        let mut configs = atn.start(rule, self.position(start, cursor_token_index));
        for index in start..cursor_token_index {
            let token = &self.tokens[index];
            if self.grammar.is_hidden(token.token_type) {
                continue;
            }
            let next = self.position(index + 1, cursor_token_index);
            let advanced = atn.advance(&configs, token.token_type, next);
            if advanced.is_empty() {
                trace!("Skipping token {index} '{}' the grammar cannot accept", token.text);
                continue;
            }
            configs = advanced;
        }

        let mut collection = CandidatesCollection::default();
        for config in &configs {
            collection.tokens.extend(
                atn.expected_by(config)
                    .filter(|token_type| !self.ignored_tokens.contains(token_type)),
            );
            let stack = config.stack();
            for (depth, frame) in stack.iter().enumerate() {
                if !self.preferred_rules.contains(&frame.rule) {
                    continue;
                }
                let context = RuleContext {
                    start_token_index: frame.start_token_index,
                    rule_list: stack[..depth].iter().map(|f| f.rule).collect(),
                };
                let contexts = collection.rules.entry(frame.rule).or_default();
                if !contexts.contains(&context) {
                    contexts.push(context);
                }
            }
        }
        collection.rules.values_mut().for_each(|contexts| contexts.sort());

        trace!(
            "Candidates at token {cursor_token_index}: tokens {:?}, rules {:?}",
            collection.tokens,
            collection.rules.keys().filter_map(|r| atn.rule_name(*r)).collect::<Vec<_>>()
        );
        Ok(collection)
    }

    /// First parser-visible token at or after `from`, never past `limit`.
    fn position(&self, from: usize, limit: usize) -> usize {
        (from..limit)
            .find(|&index| !self.grammar.is_hidden(self.tokens[index].token_type))
            .unwrap_or(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{SQL, SQL_AUTOCOMPLETE, rules::*, token_kind::*};

    struct Collected {
        tokens: Vec<Token>,
        tree: ParseNode,
        cursor_index: usize,
    }

    fn prepare(query: &str) -> Collected {
        let cursor = CursorPosition::new(1, query.chars().count() + 1);
        let mut listener = ErrorListener::new(cursor, SPACE);
        let tokens = SQL.tokenize(query, &mut listener);
        let tree = parse_sql(&SQL, &tokens, &mut listener);
        let cursor_index =
            find_cursor_token_index(&tokens, cursor, SPACE).expect("cursor is inside the query");
        Collected {
            tokens,
            tree,
            cursor_index,
        }
    }

    fn collect(query: &str) -> CandidatesCollection {
        let prepared = prepare(query);
        collector(&prepared.tokens)
            .collect(prepared.cursor_index, None)
            .expect("collection succeeds")
    }

    fn collector(tokens: &[Token]) -> CandidateCollector<'_, SqlGrammar> {
        CandidateCollector::new(
            &*SQL,
            tokens,
            &SQL_AUTOCOMPLETE.ignored_tokens,
            &SQL_AUTOCOMPLETE.preferred_rules,
        )
    }

    #[test]
    fn empty_query_offers_statement_starts() {
        let collection = collect("");
        assert_eq!(
            collection.tokens,
            BTreeSet::from([SELECT, DESCRIBE, SHOW])
        );
        assert!(collection.rules.is_empty());
    }

    #[test]
    fn from_reaches_table_name_only() {
        let collection = collect("SELECT * FROM ");
        assert!(collection.rules.contains_key(&RULE_TABLE_NAME));
        assert!(!collection.rules.contains_key(&RULE_COLUMN_NAME));
    }

    #[test]
    fn select_list_reaches_columns_and_functions() {
        let collection = collect("SELECT ");
        assert!(collection.rules.contains_key(&RULE_COLUMN_NAME));
        assert!(collection.rules.contains_key(&RULE_AGGREGATE_FUNCTION_NAME));
        assert!(collection.rules.contains_key(&RULE_SCALAR_FUNCTION_NAME));
        assert!(collection.tokens.contains(&COUNT));
        assert!(collection.tokens.contains(&DISTINCT));
        assert!(!collection.tokens.contains(&STAR));
    }

    #[test]
    fn rule_context_carries_enclosing_rules() {
        let prepared = prepare("SELECT a FROM t ORDER BY ");
        let collection = collector(&prepared.tokens)
            .collect(prepared.cursor_index, None)
            .expect("collection succeeds");
        let contexts = &collection.rules[&RULE_COLUMN_NAME];
        assert!(
            contexts
                .iter()
                .any(|context| context.rule_list.contains(&RULE_ORDER_BY_ELEMENT)
                    && context.start_token_index == prepared.cursor_index)
        );
    }

    #[test]
    fn predicate_start_is_the_column_token() {
        let prepared = prepare("SELECT * FROM orders WHERE status = ");
        let collection = collector(&prepared.tokens)
            .collect(prepared.cursor_index, None)
            .expect("collection succeeds");
        let status = prepared
            .tokens
            .iter()
            .position(|token| token.text == "status")
            .expect("status token");
        assert!(
            collection.rules[&RULE_PREDICATE]
                .iter()
                .any(|context| context.start_token_index == status)
        );
    }

    #[test]
    fn earlier_errors_are_skipped() {
        let collection = collect("SELECT FROM x WHERE ");
        assert!(!collection.tokens.is_empty());
    }

    #[test]
    fn collection_is_deterministic() {
        let query = "SELECT a, b FROM t1 JOIN t2 ON t1.id = t2.id WHERE a > 1 AND ";
        assert_eq!(collect(query), collect(query));
    }

    #[test]
    fn out_of_range_cursor_is_an_error() {
        let prepared = prepare("SELECT");
        let result = collector(&prepared.tokens).collect(prepared.tokens.len(), None);
        assert!(matches!(result, Err(Error::Collection(_))));
    }

    #[test]
    fn scoping_node_limits_simulation() {
        let prepared = prepare("SELECT a FROM t; SELECT ");
        let statement = prepared
            .tree
            .children
            .last()
            .expect("second statement")
            .clone();
        assert_eq!(prepared.tree.children.len(), 2);
        let scoped = collector(&prepared.tokens)
            .collect(prepared.cursor_index, Some(&statement))
            .expect("collection succeeds");
        assert!(scoped.rules.contains_key(&RULE_COLUMN_NAME));

        let first = prepared.tree.children[0].clone();
        let outside = collector(&prepared.tokens).collect(prepared.cursor_index, Some(&first));
        assert!(matches!(outside, Err(Error::Collection(_))));
    }
}
