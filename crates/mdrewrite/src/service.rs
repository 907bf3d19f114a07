//! Converter - the main entry point for element tree to Markdown AST conversion.

use mdrewrite_core::MdNode;
use tracing::debug;

use crate::node::Node;
use crate::options::TransformOptions;
use crate::rules::{rule_table, RuleTable};
use crate::transform::{check_depth, InvalidStructure, Transformed, Transformer};
use crate::whitespace::normalize_whitespace;
use crate::Result;

/// Result of a conversion: the Markdown tree and the call's diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult<'a> {
    /// Always a [`MdNode::Root`]
    pub tree: MdNode,
    /// Source nodes no rule handled, in document order
    pub unhandled: Vec<&'a Node>,
    /// Source nodes whose content did not fit their target variant
    pub invalid: Vec<InvalidStructure<'a>>,
}

impl TransformResult<'_> {
    /// Check if the whole tree converted without diagnostics
    pub fn is_clean(&self) -> bool {
        self.unhandled.is_empty() && self.invalid.is_empty()
    }
}

/// Second stage of a conversion pipeline, fed synchronously by
/// [`Converter::bridge`]
pub trait Destination {
    type Output;

    fn run(&mut self, result: TransformResult<'_>) -> Self::Output;
}

impl<F, O> Destination for F
where
    F: for<'a> FnMut(TransformResult<'a>) -> O,
{
    type Output = O;

    fn run(&mut self, result: TransformResult<'_>) -> O {
        self(result)
    }
}

/// The main service for converting element trees to Markdown trees
pub struct Converter<'r> {
    options: TransformOptions,
    rules: &'r RuleTable,
}

impl Converter<'static> {
    /// Create a Converter with default options and the shared default rules
    pub fn new() -> Self {
        Self::with_options(TransformOptions::default())
    }

    /// Create a Converter with custom options and the shared default rules
    pub fn with_options(options: TransformOptions) -> Self {
        Self {
            options,
            rules: rule_table(),
        }
    }
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Converter<'r> {
    /// Create a Converter using a custom rule table
    pub fn with_rules(options: TransformOptions, rules: &'r RuleTable) -> Self {
        Self { options, rules }
    }

    /// Convert a tree, normalizing its whitespace in place first.
    ///
    /// The returned diagnostics borrow from `tree`.
    pub fn convert<'a>(&self, tree: &'a mut Node) -> Result<TransformResult<'a>>
    where
        'r: 'a,
    {
        check_depth(tree, self.options.max_depth)?;
        normalize_whitespace(tree);

        let tree: &'a Node = tree;
        let Transformed { nodes, diagnostics } =
            Transformer::new(self.rules).transform(tree, &self.options)?;

        let root = match <[MdNode; 1]>::try_from(nodes) {
            Ok([root @ MdNode::Root(_)]) => root,
            Ok([other]) => MdNode::Root(vec![other]),
            Err(nodes) => MdNode::Root(nodes),
        };

        debug!(
            unhandled = diagnostics.unhandled.len(),
            invalid = diagnostics.invalid.len(),
            "conversion finished"
        );

        Ok(TransformResult {
            tree: root,
            unhandled: diagnostics.unhandled,
            invalid: diagnostics.invalid,
        })
    }

    /// Convert a tree and hand the result straight to `destination`
    pub fn bridge<D: Destination>(&self, tree: &mut Node, destination: &mut D) -> Result<D::Output> {
        let result = self.convert(tree)?;
        Ok(destination.run(result))
    }

    /// Get the current options
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut TransformOptions {
        &mut self.options
    }

    /// Get the rule table in use
    pub fn rules(&self) -> &RuleTable {
        self.rules
    }
}
