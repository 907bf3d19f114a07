//! Definition list rules.

use mdrewrite_core::MdNode;

use super::{emit, Rule, Shape};
use crate::utilities::wrap;

/// Create the definition list rules
pub fn definition_rules() -> Vec<Rule> {
    vec![
        Rule::handle(Shape::is(&["dl"]), |node, t, _| {
            emit(MdNode::definition_list(t.transform(node)?)?)
        }),
        Rule::handle(Shape::is(&["dt"]).can_have(&["id"]), |node, t, _| {
            emit(MdNode::definition_term(t.transform(node)?)?)
        }),
        Rule::handle(Shape::is(&["dd"]), |node, t, _| {
            emit(MdNode::DefinitionDescription(wrap(t.transform(node)?)))
        }),
    ]
}
