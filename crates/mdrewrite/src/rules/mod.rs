//! Rule table for element tree to Markdown AST conversion.

mod catalog;
mod code;
mod definitions;
mod notecards;
mod rule;
mod tables;

pub use catalog::default_rules;
pub use rule::{
    emit, emit_all, Handler, HandlerError, HandlerFn, HandlerResult, NameMatch, PredicateFn,
    Query, Rule, Shape,
};

use once_cell::sync::Lazy;

use crate::matcher::matches;
use crate::node::Node;

static DEFAULT_RULES: Lazy<RuleTable> = Lazy::new(default_rules);

/// The shared default rule table, built on first use
pub fn rule_table() -> &'static RuleTable {
    &DEFAULT_RULES
}

/// Ordered collection of rules; the first matching rule wins
#[derive(Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule after all existing ones
    pub fn push(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules in order
    pub fn extend(&mut self, rules: impl IntoIterator<Item = Rule>) -> &mut Self {
        self.rules.extend(rules);
        self
    }

    /// Find the first rule matching a node
    pub fn find(&self, node: &Node) -> Option<&Rule> {
        self.rules.iter().find(|rule| matches(node, &rule.query))
    }

    /// Position of the first rule matching a node
    pub fn position(&self, node: &Node) -> Option<usize> {
        self.rules.iter().position(|rule| matches(node, &rule.query))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
