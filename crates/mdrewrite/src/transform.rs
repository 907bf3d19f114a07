//! Recursive rule-driven transform of a source tree into Markdown nodes.
//!
//! Each node is handed to the first matching rule. Nodes without a rule, nodes
//! whose handler declines, and nodes whose handler reports a structural
//! violation are kept as raw markup and recorded as diagnostics; only a fatal
//! error stops the transform.

use mdrewrite_core::{MdKind, MdNode};
use tracing::{debug, trace, warn};

use crate::node::Node;
use crate::options::{OptionsPatch, TransformOptions};
use crate::rules::{Handler, HandlerError, HandlerResult, RuleTable};
use crate::utilities::wrap_text;
use crate::{Result, RewriteError};

/// A node whose handler found children that do not fit the intended variant
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidStructure<'a> {
    /// The source node that was being handled
    pub source: &'a Node,
    /// The variant the handler tried to build
    pub target: MdKind,
    /// The children that broke the variant's contract
    pub offending: Vec<MdNode>,
}

/// Non-fatal findings of a transform, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics<'a> {
    /// Source nodes that no rule handled
    pub unhandled: Vec<&'a Node>,
    /// Source nodes whose content did not fit the target variant
    pub invalid: Vec<InvalidStructure<'a>>,
}

impl<'a> Diagnostics<'a> {
    /// Move all entries of `other` to the end of ours
    pub fn append(&mut self, mut other: Diagnostics<'a>) {
        self.unhandled.append(&mut other.unhandled);
        self.invalid.append(&mut other.invalid);
    }

    pub fn is_empty(&self) -> bool {
        self.unhandled.is_empty() && self.invalid.is_empty()
    }
}

/// Output of transforming one node
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed<'a> {
    pub nodes: Vec<MdNode>,
    pub diagnostics: Diagnostics<'a>,
}

/// Child-transform continuation handed to handlers.
///
/// It carries the options in effect for the handled node and collects the
/// diagnostics of every subtree it transforms; the engine merges them into
/// the handled node's result once the handler returns.
pub struct Children<'a> {
    rules: &'a RuleTable,
    options: TransformOptions,
    diagnostics: Diagnostics<'a>,
}

impl<'a> Children<'a> {
    fn new(rules: &'a RuleTable, options: &TransformOptions) -> Self {
        Self {
            rules,
            options: options.clone(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Transform the children of `node` with the current options
    pub fn transform(&mut self, node: &'a Node) -> Result<Vec<MdNode>> {
        self.transform_with(node, &OptionsPatch::default())
    }

    /// Transform the children of `node` with `patch` applied to the options.
    ///
    /// A node carrying a raw value (text, comment) yields a single wrapped
    /// text node instead.
    pub fn transform_with(&mut self, node: &'a Node, patch: &OptionsPatch) -> Result<Vec<MdNode>> {
        let options = self.options.merge(patch);

        if let Some(value) = node.value.as_deref() {
            return Ok(vec![MdNode::Text(wrap_text(value, &options))]);
        }

        let mut out = Vec::with_capacity(node.children.len());
        for child in &node.children {
            let Transformed { nodes, diagnostics } = transform_node(self.rules, child, &options)?;
            self.diagnostics.append(diagnostics);
            out.extend(nodes);
        }
        Ok(out)
    }
}

/// Runs the rule table over a tree
#[derive(Clone, Copy)]
pub struct Transformer<'r> {
    rules: &'r RuleTable,
}

impl<'r> Transformer<'r> {
    pub fn new(rules: &'r RuleTable) -> Self {
        Self { rules }
    }

    /// Transform `node` and everything below it.
    ///
    /// Fails only on a tree deeper than `options.max_depth` or on a fatal
    /// handler error.
    pub fn transform<'a>(&self, node: &'a Node, options: &TransformOptions) -> Result<Transformed<'a>>
    where
        'r: 'a,
    {
        check_depth(node, options.max_depth)?;
        transform_node(self.rules, node, options)
    }
}

fn transform_node<'a>(
    rules: &'a RuleTable,
    node: &'a Node,
    options: &TransformOptions,
) -> Result<Transformed<'a>> {
    let mut children = Children::new(rules, options);
    let mut own = Diagnostics::default();

    let produced = match rules.find(node) {
        None => {
            debug!(tag = node.tag_name(), "no rule matched, keeping raw markup");
            own.unhandled.push(node);
            None
        }
        Some(rule) => {
            trace!(tag = node.tag_name(), node_type = ?node.node_type, "rule matched");
            match run_handler(&rule.handler, node, &mut children, options) {
                Ok(Some(nodes)) => Some(nodes),
                Ok(None) => {
                    debug!(tag = node.tag_name(), "handler declined, keeping raw markup");
                    own.unhandled.push(node);
                    None
                }
                Err(HandlerError::Invalid(violation)) => {
                    debug!(
                        tag = node.tag_name(),
                        variant = %violation.target,
                        offending = violation.offending.len(),
                        "invalid structure, keeping raw markup"
                    );
                    own.invalid.push(InvalidStructure {
                        source: node,
                        target: violation.target,
                        offending: violation.offending,
                    });
                    None
                }
                Err(HandlerError::Fatal(err)) => return Err(err),
            }
        }
    };

    let mut diagnostics = children.diagnostics;
    diagnostics.append(own);

    Ok(Transformed {
        nodes: produced.unwrap_or_else(|| vec![MdNode::Html(node.outer_html())]),
        diagnostics,
    })
}

fn run_handler<'a>(
    handler: &Handler,
    node: &'a Node,
    children: &mut Children<'a>,
    options: &TransformOptions,
) -> HandlerResult {
    match handler {
        Handler::Rename(kind) => {
            let content = children.transform(node)?;
            Ok(Some(vec![MdNode::build(*kind, content)?]))
        }
        Handler::Transform(f) => f(node, children, options),
    }
}

/// Depth of a tree, measured without recursion; stops counting past `limit`
pub fn tree_depth(root: &Node, limit: usize) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(root, 1usize)];
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        if deepest > limit {
            break;
        }
        stack.extend(node.children.iter().map(|child| (child, depth + 1)));
    }
    deepest
}

pub(crate) fn check_depth(node: &Node, limit: usize) -> Result<()> {
    let depth = tree_depth(node, limit);
    if depth > limit {
        warn!(depth, limit, "source tree too deep");
        return Err(RewriteError::TooDeep { depth, limit });
    }
    Ok(())
}
