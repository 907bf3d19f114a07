//! Whitespace normalization of the source tree.
//!
//! Runs once over the whole tree before the transform. Whitespace runs in text
//! collapse to a single character (a newline if the run held one, a space
//! otherwise), whitespace that a browser would not render at block edges or
//! after another space is removed, and text nodes left empty are dropped.
//! Preformatted elements are left untouched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::node::{Node, NodeType};
use crate::utilities::{is_block, is_preformatted, is_void};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize insignificant whitespace in place
pub fn normalize_whitespace(root: &mut Node) {
    if is_preformatted(root.tag_name()) {
        return;
    }
    collapse(root);
    strip_leading(root, &mut true);
    strip_trailing(root, &mut true);
    drop_empty_text(root);
}

/// How an element affects the whitespace around it
enum Boundary {
    /// Preformatted block, not descended into
    Opaque,
    /// Block element or root
    Block,
    /// Line break
    LineBreak,
    /// Replaced inline content such as images
    Atom,
    /// Inline element
    Inline,
}

fn boundary(node: &Node) -> Boundary {
    match node.node_type {
        NodeType::Root => Boundary::Block,
        NodeType::Element => {
            let tag = node.tag_name();
            if is_preformatted(tag) {
                Boundary::Opaque
            } else if is_block(tag) {
                Boundary::Block
            } else if tag == "br" {
                Boundary::LineBreak
            } else if node.children.is_empty() && is_void(tag) {
                Boundary::Atom
            } else {
                Boundary::Inline
            }
        }
        NodeType::Text | NodeType::Comment => Boundary::Inline,
    }
}

fn collapse(node: &mut Node) {
    for child in &mut node.children {
        match child.node_type {
            NodeType::Text => {
                if let Some(value) = child.value.as_mut() {
                    *value = WHITESPACE_RUN
                        .replace_all(value, |caps: &Captures| {
                            if caps[0].contains('\n') {
                                "\n"
                            } else {
                                " "
                            }
                        })
                        .into_owned();
                }
            }
            NodeType::Element if is_preformatted(child.tag_name()) => {}
            NodeType::Element | NodeType::Root => collapse(child),
            NodeType::Comment => {}
        }
    }
}

/// Forward pass; `pending` is set when the preceding content ended in
/// whitespace or at a block edge
fn strip_leading(node: &mut Node, pending: &mut bool) {
    for child in &mut node.children {
        if child.node_type == NodeType::Text {
            if let Some(value) = child.value.as_mut() {
                if *pending {
                    let cut = value.len() - value.trim_start().len();
                    value.replace_range(..cut, "");
                }
                if !value.is_empty() {
                    *pending = value.ends_with(char::is_whitespace);
                }
            }
            continue;
        }

        match boundary(child) {
            Boundary::Opaque => *pending = true,
            Boundary::Block => {
                *pending = true;
                strip_leading(child, pending);
                *pending = true;
            }
            Boundary::LineBreak => *pending = true,
            Boundary::Atom => *pending = false,
            Boundary::Inline => strip_leading(child, pending),
        }
    }
}

/// Backward pass; `pending` is set when the following content starts at a
/// block edge or after a line break
fn strip_trailing(node: &mut Node, pending: &mut bool) {
    for child in node.children.iter_mut().rev() {
        if child.node_type == NodeType::Text {
            if let Some(value) = child.value.as_mut() {
                if *pending {
                    let keep = value.trim_end().len();
                    value.truncate(keep);
                }
                if !value.is_empty() {
                    *pending = false;
                }
            }
            continue;
        }

        match boundary(child) {
            Boundary::Opaque => *pending = true,
            Boundary::Block => {
                *pending = true;
                strip_trailing(child, pending);
                *pending = true;
            }
            Boundary::LineBreak => *pending = true,
            Boundary::Atom => *pending = false,
            Boundary::Inline => strip_trailing(child, pending),
        }
    }
}

fn drop_empty_text(node: &mut Node) {
    node.children
        .retain(|c| !(c.is_text() && c.value.as_deref().map_or(true, str::is_empty)));
    for child in &mut node.children {
        if !is_preformatted(child.tag_name()) {
            drop_empty_text(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(node: &Node) -> Vec<String> {
        let mut out = Vec::new();
        fn walk(node: &Node, out: &mut Vec<String>) {
            for child in &node.children {
                if let Some(v) = child.value.as_ref().filter(|_| child.is_text()) {
                    out.push(v.clone());
                }
                walk(child, out);
            }
        }
        walk(node, &mut out);
        out
    }

    #[test]
    fn test_collapses_runs_and_trims_block_edges() {
        let mut p = Node::root().with_child(
            Node::element("p")
                .with_text("  Hello   ")
                .with_child(Node::element("em").with_text(" world "))
                .with_text("  "),
        );
        normalize_whitespace(&mut p);
        assert_eq!(texts(&p), vec!["Hello ", "world"]);
        assert_eq!(p.children[0].children.len(), 2);
    }

    #[test]
    fn test_keeps_space_between_inline_siblings() {
        let mut p = Node::element("p")
            .with_child(Node::element("em").with_text("a"))
            .with_text(" and ")
            .with_child(Node::element("strong").with_text("b"));
        normalize_whitespace(&mut p);
        assert_eq!(texts(&p), vec!["a", " and ", "b"]);
    }

    #[test]
    fn test_drops_whitespace_between_blocks() {
        let mut ul = Node::element("ul")
            .with_text("\n  ")
            .with_child(Node::element("li").with_text("One"))
            .with_text("\n  ")
            .with_child(Node::element("li").with_text("Two"))
            .with_text("\n");
        normalize_whitespace(&mut ul);
        assert_eq!(ul.children.len(), 2);
        assert!(ul.children.iter().all(|c| c.is_tag("li")));
    }

    #[test]
    fn test_preserves_line_breaks_inside_text() {
        let mut p = Node::element("p").with_text("one  \n  two");
        normalize_whitespace(&mut p);
        assert_eq!(texts(&p), vec!["one\ntwo"]);
    }

    #[test]
    fn test_leaves_preformatted_content_alone() {
        let code = "  fn main() {\n      x();\n  }\n";
        let mut root = Node::root()
            .with_text("  ")
            .with_child(Node::element("pre").with_text(code));
        normalize_whitespace(&mut root);
        assert_eq!(root.children.len(), 1);
        assert_eq!(texts(&root), vec![code]);
    }

    #[test]
    fn test_trims_around_line_breaks() {
        let mut p = Node::element("p")
            .with_text("a ")
            .with_child(Node::element("br"))
            .with_text(" b");
        normalize_whitespace(&mut p);
        assert_eq!(texts(&p), vec!["a", "b"]);
    }
}
