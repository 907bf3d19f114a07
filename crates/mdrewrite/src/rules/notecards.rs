//! Callout boxes (`div.notecard`), rendered as block quotes that open with a
//! bold label.

use mdrewrite_core::MdNode;

use super::{emit, Rule, Shape};
use crate::node::Node;
use crate::utilities::wrap;

/// Notecard kind classes and the label each one opens with
const CARD_KINDS: &[(&str, &str)] = &[
    ("note", "Note:"),
    ("warning", "Warning:"),
    ("callout", "Callout:"),
    ("secure", "Secure context:"),
    ("deprecated", "Deprecated:"),
    ("experimental", "Experimental:"),
    ("obsolete", "Obsolete:"),
    ("nonstandard", "Non-standard:"),
];

/// Create the notecard rule
pub fn notecard_rules() -> Vec<Rule> {
    let kinds: Vec<&str> = CARD_KINDS.iter().map(|(class, _)| *class).collect();
    vec![Rule::handle(
        Shape::is(&["div"]).has_class(&["notecard"]).can_have_class(&kinds),
        |node, t, _| {
            let mut content = wrap(t.transform(node)?);
            if let Some(label) = label(node) {
                prepend_label(&mut content, label);
            }
            emit(MdNode::Blockquote(content))
        },
    )]
}

fn label(node: &Node) -> Option<&'static str> {
    CARD_KINDS
        .iter()
        .find(|(class, _)| node.has_class(class))
        .map(|(_, label)| *label)
}

fn prepend_label(content: &mut Vec<MdNode>, label: &str) {
    let inline = content.first().map_or(false, MdNode::is_phrasing);
    if let Some(MdNode::Paragraph(children)) = content.first_mut() {
        lead_with(children, label);
    } else if inline {
        lead_with(content, label);
    } else {
        content.insert(0, MdNode::Paragraph(vec![strong(label)]));
    }
}

/// Authors often write the label themselves; keep theirs
fn lead_with(children: &mut Vec<MdNode>, label: &str) {
    if matches!(children.first(), Some(MdNode::Strong(_))) {
        return;
    }
    children.insert(0, MdNode::Text(" ".to_string()));
    children.insert(0, strong(label));
}

fn strong(label: &str) -> MdNode {
    MdNode::Strong(vec![MdNode::Text(label.to_string())])
}
