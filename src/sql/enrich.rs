//! SQL-specific processing of the preferred rules reached at the cursor.

use crate::sql::{keyword::CLAUSE_TERMINATORS, rules::*, token::Token, token_kind::*};
use crate::*;

/// Turn the rules reached at the cursor into column, table, alias, value and
/// function intents on top of `base`.
pub fn enrich_sql(
    mut base: AutocompleteResultBase,
    rules: &CandidateRules,
    tokens: &[Token],
    cursor_token_index: usize,
    cursor: CursorPosition,
    query: &str,
) -> Result<AutocompleteResultBase> {
    debug!(
        "Enriching {} rule(s) at {cursor} (token {cursor_token_index} of a {} byte query)",
        rules.len(),
        query.len()
    );
    let after_dot = previous_significant(tokens, cursor_token_index).is_some_and(|t| t.is(DOT));
    let at_caret =
        |context: &RuleContext| context.start_token_index == cursor_token_index || after_dot;

    for (&rule, contexts) in rules {
        match rule {
            RULE_TABLE_NAME if contexts.iter().any(at_caret) => {
                base.suggest_views_or_tables = Some(true);
            }
            RULE_COLUMN_NAME if contexts.iter().any(at_caret) => {
                let scope = SelectScope::at(tokens, cursor_token_index);
                trace!("Column scope at token {cursor_token_index}: {scope:?}");
                let wants_aliases = contexts.iter().any(|context| {
                    context
                        .rule_list
                        .iter()
                        .any(|r| matches!(*r, RULE_GROUP_BY_ELEMENTS | RULE_ORDER_BY_ELEMENT))
                });
                if wants_aliases {
                    base.suggest_column_aliases = Some(
                        scope
                            .aliases
                            .iter()
                            .map(|name| ColumnAlias { name: name.clone() })
                            .collect(),
                    );
                }
                base.suggest_columns = Some(ColumnSuggestion::new(scope.tables));
            }
            RULE_AGGREGATE_FUNCTION_NAME => base.suggest_aggregate_functions = Some(true),
            RULE_SCALAR_FUNCTION_NAME => base.suggest_scalar_functions = Some(true),
            RULE_PREDICATE => {
                let Some(start) = contexts.iter().map(|c| c.start_token_index).max() else {
                    continue;
                };
                let Some((predicate, column)) =
                    column_value_predicate(tokens, start, cursor_token_index)
                else {
                    trace!("Tokens {start}..{cursor_token_index} do not form a column predicate");
                    continue;
                };
                base.suggest_column_value_predicate = Some(predicate);
                if predicate == ColumnValuePredicate::Value {
                    base.suggest_values_for_column = column.filter(|c| !c.trim().is_empty());
                }
            }
            _ => {}
        }
    }
    Ok(base)
}

fn is_significant(token: &Token) -> bool {
    !token.is(SPACE)
}

fn previous_significant(tokens: &[Token], index: usize) -> Option<&Token> {
    tokens[..index.min(tokens.len())]
        .iter()
        .rev()
        .find(|token| is_significant(token))
}

/// `a`.b."c" → `a.b.c`
fn column_name(parts: &[&Token]) -> String {
    parts
        .iter()
        .filter(|token| is_identifier(token.token_type))
        .map(|token| unquote(&token.text))
        .collect::<Vec<_>>()
        .join(".")
}

/// Where the cursor sits in the predicate spanning `start..cursor`, and the
/// predicate's column name once one has been typed.
fn column_value_predicate(
    tokens: &[Token],
    start: usize,
    cursor: usize,
) -> Option<(ColumnValuePredicate, Option<String>)> {
    let span = tokens
        .get(start..cursor.min(tokens.len()))?
        .iter()
        .filter(|token| is_significant(token))
        .collect::<Vec<_>>();
    if span.is_empty() {
        return Some((ColumnValuePredicate::Column, None));
    }

    // ident (DOT ident)*
    let mut name_len = 0;
    while let Some(token) = span.get(name_len) {
        let expect_ident = name_len % 2 == 0;
        if (expect_ident && is_identifier(token.token_type)) || (!expect_ident && token.is(DOT)) {
            name_len += 1;
        } else {
            break;
        }
    }
    if name_len == 0 || name_len % 2 == 0 {
        return None;
    }
    let column = column_name(&span[..name_len]);
    let rest = &span[name_len..];

    let predicate = match rest {
        [] => ColumnValuePredicate::Operator,
        [op] if is_comparison(op.token_type) => ColumnValuePredicate::Value,
        [not, inn] if not.is(NOT) && inn.is(IN) => ColumnValuePredicate::Lparen,
        [inn] if inn.is(IN) => ColumnValuePredicate::Lparen,
        _ => in_list_position(rest)?,
    };
    Some((predicate, Some(column)))
}

/// `[NOT] IN ( v , v …` → `Value` after `(` or `,`, `EndInTerm` after a value.
fn in_list_position(rest: &[&Token]) -> Option<ColumnValuePredicate> {
    let rest = match rest {
        [not, rest @ ..] if not.is(NOT) => rest,
        rest => rest,
    };
    let [inn, open, list @ ..] = rest else {
        return None;
    };
    if !inn.is(IN) || !open.is(LR_BRACKET) {
        return None;
    }
    let mut expect_value = true;
    for token in list {
        match (expect_value, token.token_type) {
            (true, t) if is_value(t) => expect_value = false,
            (false, COMMA) => expect_value = true,
            _ => return None,
        }
    }
    Some(if expect_value {
        ColumnValuePredicate::Value
    } else {
        ColumnValuePredicate::EndInTerm
    })
}

/// Table references and select-list aliases of the `SELECT` enclosing a
/// cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectScope {
    /// Qualified names, unquoted, deduplicated, in query order.
    pub tables: Vec<String>,
    /// `AS` aliases of the select list.
    pub aliases: Vec<String>,
}

impl SelectScope {
    /// Scope of the innermost `SELECT` still open at `cursor_token_index`.
    ///
    /// Strategy:
    /// 1. Find the innermost `SELECT` before the cursor whose parentheses are
    ///    still open (nesting depth tracked, reset at `;`).
    /// 2. From that `SELECT`, find the matching `FROM` at the same depth,
    ///    without crossing `;`, `UNION` or the closing parenthesis.
    /// 3. Read the table list after the `FROM`, joins included.
    pub fn at(tokens: &[Token], cursor_token_index: usize) -> Self {
        let significant = tokens
            .iter()
            .filter(|token| is_significant(token) && !token.is(ERROR_RECOGNITION))
            .collect::<Vec<_>>();
        let cursor = significant
            .iter()
            .position(|token| token.index >= cursor_token_index)
            .unwrap_or(significant.len());

        let Some((select, depth)) = Self::locate_select(&significant[..cursor]) else {
            return Self::default();
        };
        let from = Self::locate_from(&significant, select, depth);
        let aliases = Self::extract_aliases(&significant[select + 1..from.unwrap_or(cursor)]);
        let tables = from
            .map(|from| Self::extract_tables(&significant[from + 1..]))
            .unwrap_or_default();
        Self { tables, aliases }
    }

    /// Index and parenthesis depth of the innermost open `SELECT`.
    fn locate_select(tokens: &[&Token]) -> Option<(usize, i32)> {
        let mut depth = 0;
        let mut open = Vec::<(usize, i32)>::new();
        for (idx, token) in tokens.iter().enumerate() {
            match token.token_type {
                LR_BRACKET => depth += 1,
                RR_BRACKET => {
                    depth -= 1;
                    while open.last().is_some_and(|&(_, d)| d > depth) {
                        open.pop();
                    }
                }
                SEMI => {
                    depth = 0;
                    open.clear();
                }
                SELECT => open.push((idx, depth)),
                _ => {}
            }
        }
        open.pop()
    }

    /// The `FROM` belonging to the `SELECT` at `select_idx`.
    fn locate_from(tokens: &[&Token], select_idx: usize, select_depth: i32) -> Option<usize> {
        let mut depth = select_depth;
        for (idx, token) in tokens.iter().enumerate().skip(select_idx + 1) {
            match token.token_type {
                LR_BRACKET => depth += 1,
                RR_BRACKET => {
                    depth -= 1;
                    if depth < select_depth {
                        return None;
                    }
                }
                SEMI => return None,
                UNION if depth == select_depth => return None,
                FROM if depth == select_depth => return Some(idx),
                _ => {}
            }
        }
        None
    }

    /// Table names from just after a `FROM` to the end of the table list.
    fn extract_tables(tokens: &[&Token]) -> Vec<String> {
        #[derive(PartialEq)]
        enum Expect {
            Relation,
            AfterRelation,
            Condition,
        }

        let mut tables = Vec::<String>::new();
        let mut expect = Expect::Relation;
        let mut depth = 0;
        let mut i = 0;
        while let Some(token) = tokens.get(i) {
            i += 1;
            match token.token_type {
                LR_BRACKET => {
                    depth += 1;
                    continue;
                }
                RR_BRACKET => {
                    depth -= 1;
                    if depth < 0 {
                        break;
                    }
                    // Sub-query closed; what follows is its alias.
                    if depth == 0 && expect == Expect::Relation {
                        expect = Expect::AfterRelation;
                    }
                    continue;
                }
                _ if depth > 0 => continue,
                SEMI => break,
                t if CLAUSE_TERMINATORS.contains(&t) => break,
                COMMA | JOIN => expect = Expect::Relation,
                ON => expect = Expect::Condition,
                INNER | LEFT | RIGHT | OUTER | CROSS => {}
                t if is_identifier(t) && expect == Expect::Relation => {
                    let mut parts = vec![*token];
                    while let (Some(dot), Some(part)) = (tokens.get(i), tokens.get(i + 1)) {
                        if !dot.is(DOT) || !is_identifier(part.token_type) {
                            break;
                        }
                        parts.extend([*dot, *part]);
                        i += 2;
                    }
                    let name = column_name(&parts);
                    if !tables.contains(&name) {
                        tables.push(name);
                    }
                    expect = Expect::AfterRelation;
                }
                _ => {}
            }
        }
        tables
    }

    /// `AS` aliases at the top level of a select list.
    fn extract_aliases(select_list: &[&Token]) -> Vec<String> {
        let mut depth = 0;
        let mut aliases = Vec::new();
        for (idx, token) in select_list.iter().enumerate() {
            match token.token_type {
                LR_BRACKET => depth += 1,
                RR_BRACKET => depth -= 1,
                AS if depth == 0 => {
                    if let Some(alias) = select_list
                        .get(idx + 1)
                        .filter(|alias| is_identifier(alias.token_type))
                    {
                        let alias = unquote(&alias.text).to_string();
                        if !aliases.contains(&alias) {
                            aliases.push(alias);
                        }
                    }
                }
                _ => {}
            }
        }
        aliases
    }
}
