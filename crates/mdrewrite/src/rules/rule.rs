//! Rule, Query and Handler types.

use mdrewrite_core::{MdKind, MdNode, StructuralViolation};

use crate::node::Node;
use crate::options::TransformOptions;
use crate::transform::Children;
use crate::RewriteError;

/// Type alias for node predicates
pub type PredicateFn = Box<dyn Fn(&Node) -> bool + Send + Sync>;

/// Type alias for handler functions
pub type HandlerFn = Box<
    dyn for<'a> Fn(&'a Node, &mut Children<'a>, &TransformOptions) -> HandlerResult + Send + Sync,
>;

/// What a handler produces: nodes, or `None` to decline the node
pub type HandlerResult = Result<Option<Vec<MdNode>>, HandlerError>;

/// Why a handler could not produce nodes
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The node's content does not fit the intended variant; recoverable
    #[error(transparent)]
    Invalid(#[from] StructuralViolation),

    /// A fault in a rule definition; aborts the whole transform
    #[error(transparent)]
    Fatal(#[from] RewriteError),
}

/// A query determines which nodes a rule applies to
pub enum Query {
    /// Match using a predicate function, over any node type
    Predicate(PredicateFn),
    /// Match elements whose tag is one of these
    Tags(Vec<String>),
    /// Match elements against a shape descriptor
    Shape(Shape),
}

impl Query {
    /// Create a query for a single tag
    pub fn tag(name: &str) -> Self {
        Query::Tags(vec![name.to_lowercase()])
    }

    /// Create a query for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Query::Tags(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a query with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        Query::Predicate(Box::new(f))
    }
}

impl From<Shape> for Query {
    fn from(shape: Shape) -> Self {
        Query::Shape(shape)
    }
}

/// A name accepted by the optional part of a shape
pub enum NameMatch {
    Literal(String),
    Predicate(fn(&str) -> bool),
}

impl NameMatch {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::Literal(literal) => literal == name,
            NameMatch::Predicate(f) => f(name),
        }
    }
}

/// Structured description of the elements a rule accepts.
///
/// Besides the tag, a shape accounts for every attribute and every class
/// token of the element: each must be required (`has`, `has_class`) or
/// optional (`can_have`, `can_have_class`). An element carrying anything else
/// does not match.
#[derive(Default)]
pub struct Shape {
    pub is: Option<Vec<String>>,
    pub has: Vec<String>,
    pub can_have: Vec<NameMatch>,
    pub has_class: Vec<String>,
    pub can_have_class: Vec<NameMatch>,
}

impl Shape {
    /// Any element with neither attributes nor classes
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one of these tags
    pub fn is(tags: &[&str]) -> Self {
        Self {
            is: Some(tags.iter().map(|t| t.to_lowercase()).collect()),
            ..Self::default()
        }
    }

    pub fn has(mut self, names: &[&str]) -> Self {
        self.has.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn can_have(mut self, names: &[&str]) -> Self {
        self.can_have
            .extend(names.iter().map(|n| NameMatch::Literal(n.to_string())));
        self
    }

    pub fn has_class(mut self, classes: &[&str]) -> Self {
        self.has_class.extend(classes.iter().map(|c| c.to_string()));
        self
    }

    pub fn can_have_class(mut self, classes: &[&str]) -> Self {
        self.can_have_class
            .extend(classes.iter().map(|c| NameMatch::Literal(c.to_string())));
        self
    }

    /// Accept any class token the predicate matches
    pub fn can_have_class_matching(mut self, f: fn(&str) -> bool) -> Self {
        self.can_have_class.push(NameMatch::Predicate(f));
        self
    }
}

/// How a matched node is turned into target nodes
pub enum Handler {
    /// Build the named variant from the transformed children
    Rename(MdKind),
    /// Run a function with the node and a child-transform continuation
    Transform(HandlerFn),
}

impl Handler {
    /// Create a function handler
    pub fn transform<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a Node, &mut Children<'a>, &TransformOptions) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        Handler::Transform(Box::new(f))
    }
}

/// A rule defines how a matched source node becomes Markdown nodes
pub struct Rule {
    /// Query to determine which nodes this rule applies to
    pub query: Query,
    /// Handler producing the target nodes
    pub handler: Handler,
}

impl Rule {
    /// Create a new rule
    pub fn new(query: impl Into<Query>, handler: Handler) -> Self {
        Self {
            query: query.into(),
            handler,
        }
    }

    /// Create a rule that renames matching nodes to a target variant
    pub fn rename(query: impl Into<Query>, kind: MdKind) -> Self {
        Self::new(query, Handler::Rename(kind))
    }

    /// Create a rule with a handler function
    pub fn handle<F>(query: impl Into<Query>, handler: F) -> Self
    where
        F: for<'a> Fn(&'a Node, &mut Children<'a>, &TransformOptions) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        Self::new(query, Handler::transform(handler))
    }
}

/// Emit a single node
pub fn emit(node: MdNode) -> HandlerResult {
    Ok(Some(vec![node]))
}

/// Emit a sequence of nodes
pub fn emit_all(nodes: Vec<MdNode>) -> HandlerResult {
    Ok(Some(nodes))
}
