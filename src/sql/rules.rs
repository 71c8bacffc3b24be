//! The SQL grammar as data.
//!
//! Each rule is an [`Element`] tree over the token types of
//! [`token_kind`](crate::sql::token_kind). Rule ids are dense; the names match
//! the rule names used in trace output.

use crate::sql::{token::Token, token_kind::*, tokenizer};
use crate::*;
use std::sync::LazyLock;

pub const RULE_ROOT: RuleId = 0;
pub const RULE_STATEMENT: RuleId = 1;
pub const RULE_SELECT_STATEMENT: RuleId = 2;
pub const RULE_DESCRIBE_STATEMENT: RuleId = 3;
pub const RULE_SHOW_STATEMENT: RuleId = 4;
pub const RULE_TABLE_FILTER: RuleId = 5;
pub const RULE_COLUMN_FILTER: RuleId = 6;
pub const RULE_SELECT_ELEMENTS: RuleId = 7;
pub const RULE_SELECT_ELEMENT: RuleId = 8;
pub const RULE_FROM_CLAUSE: RuleId = 9;
pub const RULE_TABLE_SOURCE: RuleId = 10;
pub const RULE_RELATION: RuleId = 11;
pub const RULE_JOIN_PART: RuleId = 12;
pub const RULE_WHERE_CLAUSE: RuleId = 13;
pub const RULE_GROUP_BY_CLAUSE: RuleId = 14;
pub const RULE_GROUP_BY_ELEMENTS: RuleId = 15;
pub const RULE_HAVING_CLAUSE: RuleId = 16;
pub const RULE_ORDER_BY_CLAUSE: RuleId = 17;
pub const RULE_ORDER_BY_ELEMENT: RuleId = 18;
pub const RULE_LIMIT_CLAUSE: RuleId = 19;
pub const RULE_EXPRESSION: RuleId = 20;
pub const RULE_PREDICATE: RuleId = 21;
pub const RULE_COMPARISON_OPERATOR: RuleId = 22;
pub const RULE_EXPRESSION_ATOM: RuleId = 23;
pub const RULE_PRIMARY_ATOM: RuleId = 24;
pub const RULE_CASE_EXPRESSION: RuleId = 25;
pub const RULE_FUNCTION_CALL: RuleId = 26;
pub const RULE_AGGREGATE_FUNCTION: RuleId = 27;
pub const RULE_AGGREGATE_FUNCTION_NAME: RuleId = 28;
pub const RULE_SCALAR_FUNCTION_NAME: RuleId = 29;
pub const RULE_FUNCTION_ARGS: RuleId = 30;
pub const RULE_LITERAL: RuleId = 31;
pub const RULE_COLUMN_NAME: RuleId = 32;
pub const RULE_TABLE_NAME: RuleId = 33;
pub const RULE_ALIAS: RuleId = 34;
pub const RULE_IDENT: RuleId = 35;

fn t(token_type: TokenType) -> Element {
    Element::token(token_type)
}

fn r(rule: RuleId) -> Element {
    Element::rule(rule)
}

fn seq<const N: usize>(items: [Element; N]) -> Element {
    Element::seq(items)
}

fn alt<const N: usize>(items: [Element; N]) -> Element {
    Element::alt(items)
}

/// `(AS)? alias`
fn aliased() -> Element {
    seq([t(AS).opt(), r(RULE_ALIAS)])
}

/// `SELECT (DISTINCT | ALL)? selectElements fromClause?`
fn select_core() -> Element {
    seq([
        t(SELECT),
        Element::any_token([DISTINCT, ALL]).opt(),
        r(RULE_SELECT_ELEMENTS),
        r(RULE_FROM_CLAUSE).opt(),
    ])
}

/// `rule (',' rule)*`
fn comma_list(rule: RuleId) -> Element {
    seq([r(rule), seq([t(COMMA), r(rule)]).star()])
}

pub fn sql_rules() -> Vec<RuleDef> {
    vec![
        RuleDef::new(
            RULE_ROOT,
            "root",
            seq([
                r(RULE_STATEMENT).opt(),
                seq([t(SEMI), r(RULE_STATEMENT).opt()]).star(),
                t(EOF),
            ]),
        ),
        RuleDef::new(
            RULE_STATEMENT,
            "statement",
            alt([
                r(RULE_SELECT_STATEMENT),
                r(RULE_DESCRIBE_STATEMENT),
                r(RULE_SHOW_STATEMENT),
            ]),
        ),
        RuleDef::new(
            RULE_SELECT_STATEMENT,
            "selectStatement",
            seq([
                select_core(),
                seq([t(UNION), t(ALL).opt(), select_core()]).star(),
            ]),
        ),
        RuleDef::new(
            RULE_DESCRIBE_STATEMENT,
            "describeStatement",
            seq([
                t(DESCRIBE),
                t(TABLES),
                t(LIKE),
                r(RULE_TABLE_FILTER),
                seq([t(COLUMNS), t(LIKE), r(RULE_COLUMN_FILTER)]).opt(),
            ]),
        ),
        RuleDef::new(
            RULE_SHOW_STATEMENT,
            "showStatement",
            seq([t(SHOW), t(TABLES), t(LIKE), r(RULE_TABLE_FILTER)]),
        ),
        RuleDef::new(
            RULE_TABLE_FILTER,
            "tableFilter",
            alt([t(STRING_LITERAL), r(RULE_TABLE_NAME)]),
        ),
        RuleDef::new(
            RULE_COLUMN_FILTER,
            "columnFilter",
            alt([t(STRING_LITERAL), r(RULE_COLUMN_NAME)]),
        ),
        RuleDef::new(
            RULE_SELECT_ELEMENTS,
            "selectElements",
            seq([
                alt([t(STAR), r(RULE_SELECT_ELEMENT)]),
                seq([t(COMMA), r(RULE_SELECT_ELEMENT)]).star(),
            ]),
        ),
        RuleDef::new(
            RULE_SELECT_ELEMENT,
            "selectElement",
            seq([r(RULE_EXPRESSION), aliased().opt()]),
        ),
        RuleDef::new(
            RULE_FROM_CLAUSE,
            "fromClause",
            seq([
                t(FROM),
                comma_list(RULE_TABLE_SOURCE),
                r(RULE_WHERE_CLAUSE).opt(),
                r(RULE_GROUP_BY_CLAUSE).opt(),
                r(RULE_HAVING_CLAUSE).opt(),
                r(RULE_ORDER_BY_CLAUSE).opt(),
                r(RULE_LIMIT_CLAUSE).opt(),
            ]),
        ),
        RuleDef::new(
            RULE_TABLE_SOURCE,
            "tableSource",
            seq([r(RULE_RELATION), r(RULE_JOIN_PART).star()]),
        ),
        RuleDef::new(
            RULE_RELATION,
            "relation",
            alt([
                seq([r(RULE_TABLE_NAME), aliased().opt()]),
                seq([
                    t(LR_BRACKET),
                    r(RULE_SELECT_STATEMENT),
                    t(RR_BRACKET),
                    aliased(),
                ]),
            ]),
        ),
        RuleDef::new(
            RULE_JOIN_PART,
            "joinPart",
            seq([
                alt([
                    t(INNER),
                    t(CROSS),
                    seq([Element::any_token([LEFT, RIGHT]), t(OUTER).opt()]),
                ])
                .opt(),
                t(JOIN),
                r(RULE_RELATION),
                seq([t(ON), r(RULE_EXPRESSION)]).opt(),
            ]),
        ),
        RuleDef::new(
            RULE_WHERE_CLAUSE,
            "whereClause",
            seq([t(WHERE), r(RULE_EXPRESSION)]),
        ),
        RuleDef::new(
            RULE_GROUP_BY_CLAUSE,
            "groupByClause",
            seq([t(GROUP), t(BY), r(RULE_GROUP_BY_ELEMENTS)]),
        ),
        RuleDef::new(
            RULE_GROUP_BY_ELEMENTS,
            "groupByElements",
            comma_list(RULE_EXPRESSION),
        ),
        RuleDef::new(
            RULE_HAVING_CLAUSE,
            "havingClause",
            seq([t(HAVING), r(RULE_EXPRESSION)]),
        ),
        RuleDef::new(
            RULE_ORDER_BY_CLAUSE,
            "orderByClause",
            seq([t(ORDER), t(BY), comma_list(RULE_ORDER_BY_ELEMENT)]),
        ),
        RuleDef::new(
            RULE_ORDER_BY_ELEMENT,
            "orderByElement",
            seq([
                r(RULE_EXPRESSION),
                Element::any_token([ASC, DESC]).opt(),
                seq([t(NULLS), Element::any_token([FIRST, LAST])]).opt(),
            ]),
        ),
        RuleDef::new(
            RULE_LIMIT_CLAUSE,
            "limitClause",
            seq([
                t(LIMIT),
                t(DECIMAL_LITERAL),
                seq([t(OFFSET), t(DECIMAL_LITERAL)]).opt(),
            ]),
        ),
        // Chains are loops, not right recursion: the call stack stays flat
        // however many terms a condition has.
        RuleDef::new(
            RULE_EXPRESSION,
            "expression",
            seq([
                t(NOT).star(),
                r(RULE_PREDICATE),
                seq([
                    Element::any_token([AND, OR]),
                    t(NOT).star(),
                    r(RULE_PREDICATE),
                ])
                .star(),
            ]),
        ),
        RuleDef::new(
            RULE_PREDICATE,
            "predicate",
            seq([
                r(RULE_EXPRESSION_ATOM),
                alt([
                    seq([r(RULE_COMPARISON_OPERATOR), r(RULE_EXPRESSION_ATOM)]),
                    seq([
                        t(NOT).opt(),
                        t(IN),
                        t(LR_BRACKET),
                        comma_list(RULE_EXPRESSION_ATOM),
                        t(RR_BRACKET),
                    ]),
                    seq([t(IS), t(NOT).opt(), t(NULL)]),
                    seq([t(NOT).opt(), t(LIKE), r(RULE_EXPRESSION_ATOM)]),
                    seq([
                        t(NOT).opt(),
                        t(BETWEEN),
                        r(RULE_EXPRESSION_ATOM),
                        t(AND),
                        r(RULE_EXPRESSION_ATOM),
                    ]),
                ])
                .opt(),
            ]),
        ),
        RuleDef::new(
            RULE_COMPARISON_OPERATOR,
            "comparisonOperator",
            Element::any_token([
                EQUAL,
                NOT_EQUAL,
                LESS,
                LESS_EQUAL,
                GREATER,
                GREATER_EQUAL,
            ]),
        ),
        RuleDef::new(
            RULE_EXPRESSION_ATOM,
            "expressionAtom",
            seq([
                r(RULE_PRIMARY_ATOM),
                seq([
                    Element::any_token([STAR, SLASH, MODULE, PLUS, MINUS]),
                    r(RULE_PRIMARY_ATOM),
                ])
                .star(),
            ]),
        ),
        RuleDef::new(
            RULE_PRIMARY_ATOM,
            "primaryAtom",
            alt([
                r(RULE_LITERAL),
                r(RULE_FUNCTION_CALL),
                r(RULE_COLUMN_NAME),
                r(RULE_CASE_EXPRESSION),
                seq([
                    t(LR_BRACKET),
                    alt([r(RULE_EXPRESSION), r(RULE_SELECT_STATEMENT)]),
                    t(RR_BRACKET),
                ]),
            ]),
        ),
        RuleDef::new(
            RULE_CASE_EXPRESSION,
            "caseExpression",
            seq([
                t(CASE),
                seq([
                    t(WHEN),
                    r(RULE_EXPRESSION),
                    t(THEN),
                    r(RULE_EXPRESSION_ATOM),
                ])
                .plus(),
                seq([t(ELSE), r(RULE_EXPRESSION_ATOM)]).opt(),
                t(END),
            ]),
        ),
        RuleDef::new(
            RULE_FUNCTION_CALL,
            "functionCall",
            alt([
                r(RULE_AGGREGATE_FUNCTION),
                seq([
                    r(RULE_SCALAR_FUNCTION_NAME),
                    t(LR_BRACKET),
                    r(RULE_FUNCTION_ARGS).opt(),
                    t(RR_BRACKET),
                ]),
            ]),
        ),
        RuleDef::new(
            RULE_AGGREGATE_FUNCTION,
            "aggregateFunction",
            seq([
                r(RULE_AGGREGATE_FUNCTION_NAME),
                t(LR_BRACKET),
                alt([t(STAR), seq([t(DISTINCT).opt(), r(RULE_EXPRESSION)])]),
                t(RR_BRACKET),
            ]),
        ),
        RuleDef::new(
            RULE_AGGREGATE_FUNCTION_NAME,
            "aggregateFunctionName",
            Element::any_token([AVG, COUNT, MAX, MIN, SUM]),
        ),
        RuleDef::new(
            RULE_SCALAR_FUNCTION_NAME,
            "scalarFunctionName",
            Element::any_token([
                ABS, CEIL, FLOOR, ROUND, SQRT, CONCAT, LENGTH, LOWER, UPPER, SUBSTRING, TRIM,
                COALESCE, IFNULL, NOW,
            ]),
        ),
        RuleDef::new(
            RULE_FUNCTION_ARGS,
            "functionArgs",
            comma_list(RULE_EXPRESSION),
        ),
        RuleDef::new(
            RULE_LITERAL,
            "literal",
            Element::any_token([
                STRING_LITERAL,
                DECIMAL_LITERAL,
                REAL_LITERAL,
                TRUE,
                FALSE,
                NULL,
            ]),
        ),
        RuleDef::new(
            RULE_COLUMN_NAME,
            "columnName",
            seq([r(RULE_IDENT), seq([t(DOT), r(RULE_IDENT)]).star()]),
        ),
        RuleDef::new(
            RULE_TABLE_NAME,
            "tableName",
            seq([r(RULE_IDENT), seq([t(DOT), r(RULE_IDENT)]).opt()]),
        ),
        RuleDef::new(RULE_ALIAS, "alias", r(RULE_IDENT)),
        RuleDef::new(
            RULE_IDENT,
            "ident",
            Element::any_token([ID, BACKTICK_QUOTE_ID, DOUBLE_QUOTE_ID]),
        ),
    ]
}

/// The SQL grammar: tokenizer, vocabulary and compiled rules.
#[derive(Debug, Clone)]
pub struct SqlGrammar {
    atn: Atn,
    vocabulary: Vocabulary,
}

impl SqlGrammar {
    pub fn new() -> Self {
        Self {
            atn: Atn::new(RULE_ROOT, sql_rules()),
            vocabulary: Vocabulary::new(SQL_TOKENS.iter().map(|token| VocabularyEntry {
                literal: token.literal,
                symbolic: token.symbolic,
            })),
        }
    }
}

impl Default for SqlGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar for SqlGrammar {
    fn tokenize(&self, text: &str, listener: &mut ErrorListener) -> Vec<Token> {
        tokenizer::tokenize(text, listener)
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn atn(&self) -> &Atn {
        &self.atn
    }

    fn is_hidden(&self, token_type: TokenType) -> bool {
        matches!(token_type, SPACE | ERROR_RECOGNITION)
    }
}

pub static SQL: LazyLock<SqlGrammar> = LazyLock::new(SqlGrammar::new);

/// Parse `tokens`, reporting syntax errors to `listener`.
///
/// The tree is the root node with one `statement` child per `;`-separated
/// statement; empty statements are dropped.
pub fn parse_sql(grammar: &SqlGrammar, tokens: &[Token], listener: &mut ErrorListener) -> ParseNode {
    grammar.atn.recognize(
        tokens,
        |token_type| grammar.is_hidden(token_type),
        &grammar.vocabulary,
        listener,
    );

    let mut root = ParseNode::new(RULE_ROOT, 0, tokens.len().saturating_sub(1));
    let mut statement: Option<(usize, usize)> = None;
    for token in tokens {
        if grammar.is_hidden(token.token_type) {
            continue;
        }
        if matches!(token.token_type, SEMI | EOF) {
            if let Some((start, stop)) = statement.take() {
                root.children
                    .push(ParseNode::new(RULE_STATEMENT, start, stop));
            }
            continue;
        }
        statement = Some(match statement {
            Some((start, _)) => (start, token.index),
            None => (token.index, token.index),
        });
    }
    root
}
