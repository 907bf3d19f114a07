//! Query matching.

use std::collections::HashSet;

use crate::node::Node;
use crate::rules::{NameMatch, Query, Shape};

/// Check if a query matches a node.
///
/// Predicates see every node type; tag lists and shapes only match elements.
pub fn matches(node: &Node, query: &Query) -> bool {
    match query {
        Query::Predicate(f) => f(node),
        Query::Tags(tags) => node.is_element() && tags.iter().any(|t| node.is_tag(t)),
        Query::Shape(shape) => matches_shape(node, shape),
    }
}

fn matches_shape(node: &Node, shape: &Shape) -> bool {
    if !node.is_element() {
        return false;
    }

    if let Some(tags) = &shape.is {
        if !tags.iter().any(|t| node.is_tag(t)) {
            return false;
        }
    }

    is_exhaustive(node.attribute_names(), &shape.has, &shape.can_have)
        && is_exhaustive(
            node.class_names().iter().map(String::as_str),
            &shape.has_class,
            &shape.can_have_class,
        )
}

/// Check that `present` is fully accounted for.
///
/// Every `required` name must be present. Whatever is left after removing them
/// must be matched by an `optional` entry; a single leftover fails the check.
pub fn is_exhaustive<'a>(
    present: impl IntoIterator<Item = &'a str>,
    required: &[String],
    optional: &[NameMatch],
) -> bool {
    let mut remaining: HashSet<&str> = present.into_iter().collect();

    for name in required {
        if !remaining.remove(name.as_str()) {
            return false;
        }
    }

    remaining.retain(|name| !optional.iter().any(|m| m.matches(name)));
    remaining.is_empty()
}
