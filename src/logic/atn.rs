//! Grammar rules compiled into an automaton and simulated over tokens.
//!
//! Rules are plain data ([`Element`] trees). [`Atn::new`] compiles them into
//! a network of states linked by epsilon, token-match and rule-call
//! transitions. A [`Configuration`] is a state plus the stack of rule
//! invocations that led to it; simulating a token stream means moving a set of
//! configurations across one matching transition per token and expanding the
//! result through every epsilon and call transition (the closure).
//!
//! The same simulation backs the error-reporting parser ([`Atn::recognize`])
//! and the candidate collector.

use crate::{sql::Token, *};
use itertools::Itertools;
use std::collections::{BTreeSet, HashSet};

pub type StateId = usize;

/// Body of a grammar rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Token(TokenType),
    Rule(RuleId),
    Seq(Vec<Element>),
    Alt(Vec<Element>),
    Opt(Box<Element>),
    Star(Box<Element>),
}

impl Element {
    pub fn token(token_type: TokenType) -> Self {
        Element::Token(token_type)
    }

    pub fn rule(rule: RuleId) -> Self {
        Element::Rule(rule)
    }

    pub fn seq(items: impl IntoIterator<Item = Element>) -> Self {
        Element::Seq(items.into_iter().collect())
    }

    pub fn alt(items: impl IntoIterator<Item = Element>) -> Self {
        Element::Alt(items.into_iter().collect())
    }

    /// Any one of the given token types.
    pub fn any_token(token_types: impl IntoIterator<Item = TokenType>) -> Self {
        Element::alt(token_types.into_iter().map(Element::Token))
    }

    pub fn opt(self) -> Self {
        Element::Opt(Box::new(self))
    }

    pub fn star(self) -> Self {
        Element::Star(Box::new(self))
    }

    pub fn plus(self) -> Self {
        Element::seq([self.clone(), self.star()])
    }
}

#[derive(Debug, Clone)]
pub struct RuleDef {
    pub id: RuleId,
    pub name: &'static str,
    pub body: Element,
}

impl RuleDef {
    pub fn new(id: RuleId, name: &'static str, body: Element) -> Self {
        Self { id, name, body }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Epsilon(StateId),
    Match(TokenType, StateId),
    Call { rule: RuleId, follow: StateId },
}

#[derive(Debug, Clone, Copy)]
struct RuleStates {
    start: StateId,
    stop: StateId,
}

/// One rule invocation on a simulated call stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    pub rule: RuleId,
    /// Index of the first token the invocation may consume.
    pub start_token_index: usize,
    follow: Option<StateId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    state: StateId,
    stack: Vec<Frame>,
}

impl Configuration {
    /// Rule invocations from the entry rule (first) to the innermost one.
    pub fn stack(&self) -> &[Frame] {
        &self.stack
    }
}

#[derive(Debug, Clone)]
pub struct Atn {
    root: RuleId,
    names: Vec<&'static str>,
    rules: Vec<RuleStates>,
    transitions: Vec<Vec<Transition>>,
}

impl Atn {
    /// Compile `rules` (ids must be dense, starting at zero) with `root` as the
    /// entry rule.
    pub fn new(root: RuleId, mut rules: Vec<RuleDef>) -> Self {
        rules.sort_by_key(|rule| rule.id);
        debug_assert!(
            rules
                .iter()
                .enumerate()
                .all(|(index, rule)| rule.id as usize == index),
            "rule ids must be dense"
        );

        let mut atn = Atn {
            root,
            names: rules.iter().map(|rule| rule.name).collect(),
            rules: Vec::with_capacity(rules.len()),
            transitions: Vec::new(),
        };
        for _ in &rules {
            let start = atn.add_state();
            let stop = atn.add_state();
            atn.rules.push(RuleStates { start, stop });
        }
        for (states, rule) in atn.rules.clone().into_iter().zip(&rules) {
            let end = atn.compile(&rule.body, states.start);
            atn.link(end, Transition::Epsilon(states.stop));
        }
        atn
    }

    pub fn root(&self) -> RuleId {
        self.root
    }

    pub fn rule_name(&self, rule: RuleId) -> Option<&'static str> {
        self.names.get(rule as usize).copied()
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    fn add_state(&mut self) -> StateId {
        self.transitions.push(Vec::new());
        self.transitions.len() - 1
    }

    fn link(&mut self, from: StateId, transition: Transition) {
        self.transitions[from].push(transition);
    }

    /// Thompson construction: returns the state reached after `element`.
    fn compile(&mut self, element: &Element, from: StateId) -> StateId {
        match element {
            Element::Token(token_type) => {
                let to = self.add_state();
                self.link(from, Transition::Match(*token_type, to));
                to
            }
            Element::Rule(rule) => {
                let follow = self.add_state();
                self.link(
                    from,
                    Transition::Call {
                        rule: *rule,
                        follow,
                    },
                );
                follow
            }
            Element::Seq(items) => items
                .iter()
                .fold(from, |at, item| self.compile(item, at)),
            Element::Alt(items) => {
                let end = self.add_state();
                for item in items {
                    let exit = self.compile(item, from);
                    self.link(exit, Transition::Epsilon(end));
                }
                end
            }
            Element::Opt(inner) => {
                let end = self.add_state();
                let exit = self.compile(inner, from);
                self.link(exit, Transition::Epsilon(end));
                self.link(from, Transition::Epsilon(end));
                end
            }
            Element::Star(inner) => {
                let head = self.add_state();
                self.link(from, Transition::Epsilon(head));
                let exit = self.compile(inner, head);
                self.link(exit, Transition::Epsilon(head));
                let end = self.add_state();
                self.link(head, Transition::Epsilon(end));
                end
            }
        }
    }

    /// Configurations entering `rule` with its first token at `token_index`.
    pub fn start(&self, rule: RuleId, token_index: usize) -> Vec<Configuration> {
        let Some(states) = self.rules.get(rule as usize) else {
            return Vec::new();
        };
        let entry = Configuration {
            state: states.start,
            stack: vec![Frame {
                rule,
                start_token_index: token_index,
                follow: None,
            }],
        };
        self.closure(vec![entry], token_index)
    }

    /// Consume one token of type `token_type`. Rules entered afterwards start at
    /// `next_token_index`. An empty result means the token was not viable.
    pub fn advance(
        &self,
        configs: &[Configuration],
        token_type: TokenType,
        next_token_index: usize,
    ) -> Vec<Configuration> {
        let moved = configs
            .iter()
            .flat_map(|config| {
                self.transitions[config.state]
                    .iter()
                    .filter_map(move |transition| match *transition {
                        Transition::Match(expected, to) if expected == token_type => {
                            Some(Configuration {
                                state: to,
                                stack: config.stack.clone(),
                            })
                        }
                        _ => None,
                    })
            })
            .collect();
        self.closure(moved, next_token_index)
    }

    /// Token types `config` can consume next.
    pub fn expected_by<'a>(
        &'a self,
        config: &'a Configuration,
    ) -> impl Iterator<Item = TokenType> + 'a {
        self.transitions[config.state]
            .iter()
            .filter_map(|transition| match transition {
                Transition::Match(token_type, _) => Some(*token_type),
                _ => None,
            })
    }

    pub fn expected(&self, configs: &[Configuration]) -> BTreeSet<TokenType> {
        configs
            .iter()
            .flat_map(|config| self.expected_by(config))
            .collect()
    }

    /// Expand `seeds` through epsilon, call and return transitions, keeping the
    /// configurations that can match a token plus those that finished the entry
    /// rule.
    fn closure(&self, seeds: Vec<Configuration>, token_index: usize) -> Vec<Configuration> {
        let mut seen = HashSet::new();
        let mut pending = seeds;
        pending.reverse();
        let mut out = Vec::new();

        while let Some(config) = pending.pop() {
            if !seen.insert(config.clone()) {
                continue;
            }
            let Some(frame) = config.stack.last() else {
                continue;
            };
            if self.rules[frame.rule as usize].stop == config.state {
                match frame.follow {
                    Some(follow) => {
                        let mut stack = config.stack.clone();
                        stack.pop();
                        pending.push(Configuration {
                            state: follow,
                            stack,
                        });
                    }
                    None => out.push(config),
                }
                continue;
            }

            let mut matches = false;
            for transition in self.transitions[config.state].iter().rev() {
                match *transition {
                    Transition::Epsilon(to) => pending.push(Configuration {
                        state: to,
                        stack: config.stack.clone(),
                    }),
                    Transition::Match(..) => matches = true,
                    Transition::Call { rule, follow } => {
                        let Some(states) = self.rules.get(rule as usize) else {
                            continue;
                        };
                        // Left recursion: the same rule at the same position.
                        if config
                            .stack
                            .iter()
                            .any(|f| f.rule == rule && f.start_token_index == token_index)
                        {
                            continue;
                        }
                        let mut stack = config.stack.clone();
                        stack.push(Frame {
                            rule,
                            start_token_index: token_index,
                            follow: Some(follow),
                        });
                        pending.push(Configuration {
                            state: states.start,
                            stack,
                        });
                    }
                }
            }
            if matches {
                out.push(config);
            }
        }
        out
    }

    /// Run the automaton over every token the parser sees and report each one
    /// it cannot accept. Offending tokens are dropped and parsing continues.
    pub fn recognize(
        &self,
        tokens: &[Token],
        hidden: impl Fn(TokenType) -> bool,
        vocabulary: &Vocabulary,
        listener: &mut ErrorListener,
    ) {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !hidden(token.token_type))
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        let Some(&first) = significant.first() else {
            return;
        };

        let mut configs = self.start(self.root, first);
        for (position, &index) in significant.iter().enumerate() {
            let token = &tokens[index];
            let next = significant
                .get(position + 1)
                .copied()
                .unwrap_or(tokens.len());
            let advanced = self.advance(&configs, token.token_type, next);
            if advanced.is_empty() {
                let expected = self
                    .expected(&configs)
                    .into_iter()
                    .map(|token_type| vocabulary.display_name(token_type))
                    .join(", ");
                listener.syntax_error(
                    Some(token),
                    token.line,
                    token.column,
                    format!(
                        "mismatched input '{}' expecting {{{expected}}}",
                        token.display_text()
                    ),
                );
                continue;
            }
            configs = advanced;
        }
    }
}
