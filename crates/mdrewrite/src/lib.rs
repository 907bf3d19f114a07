//! # mdrewrite
//!
//! Rewrite HTML element trees into a Markdown syntax tree with a declarative
//! rule table.
//!
//! ## Design
//!
//! Each rule pairs a query (a predicate, a tag list, or a [`Shape`] that must
//! account for every attribute and class of an element) with a handler. The
//! first matching rule wins. Anything the rules do not cover is kept as raw
//! markup and reported, so the conversion never silently loses content:
//!
//! - **Unhandled** nodes matched no rule, or their handler declined them
//! - **Invalid** nodes had content that does not fit the Markdown node their
//!   handler tried to build
//!
//! Neither stops the conversion; only a fault in a rule definition or a tree
//! deeper than [`TransformOptions::max_depth`] does.
//!
//! ## Example
//!
//! ```rust
//! use mdrewrite::{Converter, MdNode, Node};
//!
//! let mut tree = Node::root()
//!     .with_child(Node::element_with_attrs("h2", vec![("id", "intro")]).with_text("Intro"))
//!     .with_child(Node::element("marquee").with_text("legacy"));
//!
//! let result = Converter::new().convert(&mut tree).unwrap();
//!
//! assert_eq!(
//!     result.tree,
//!     MdNode::Root(vec![
//!         MdNode::Heading { depth: 2, children: vec![MdNode::Text("Intro".into())] },
//!         MdNode::Html("<marquee>legacy</marquee>".into()),
//!     ])
//! );
//! assert_eq!(result.unhandled.len(), 1);
//! ```

mod matcher;
pub mod node;
mod options;
pub mod rules;
mod service;
mod transform;
pub mod utilities;
mod whitespace;

pub use mdrewrite_core::{
    BuildResult, ListItem, MdKind, MdNode, StructuralViolation, TableCell, TableRow,
    MAX_HEADING_DEPTH,
};
pub use matcher::{is_exhaustive, matches};
pub use node::{AttrValue, Node, NodeType};
pub use options::{OptionsPatch, TransformOptions, DEFAULT_MAX_DEPTH, DEFAULT_WIDTH};
pub use rules::{default_rules, rule_table, Handler, HandlerError, Query, Rule, RuleTable, Shape};
pub use service::{Converter, Destination, TransformResult};
pub use transform::{tree_depth, Children, Diagnostics, InvalidStructure, Transformed, Transformer};
pub use whitespace::normalize_whitespace;

/// Fatal conversion errors
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("source tree is {depth} levels deep, limit is {limit}")]
    TooDeep { depth: usize, limit: usize },

    #[error("rule error: {0}")]
    Rule(String),
}

pub type Result<T> = std::result::Result<T, RewriteError>;
