//! Utility functions and constants for text handling.

use mdrewrite_core::{MdKind, MdNode, StructuralViolation};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::{Node, NodeType};
use crate::options::TransformOptions;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hgroup", "hr", "html", "isindex", "li",
    "main", "menu", "nav", "noframes", "noscript", "ol", "output", "p", "pre",
    "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
    "ul",
];

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose whitespace is significant
pub const PREFORMATTED_ELEMENTS: &[&str] = &["pre", "textarea", "listing", "plaintext"];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag keeps its whitespace
pub fn is_preformatted(tag: &str) -> bool {
    PREFORMATTED_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Re-flow text to the configured column width.
///
/// Lines break only between words. In single-line mode every whitespace run
/// becomes one space. A leading or trailing whitespace run is kept as a single
/// space so adjacent inline content stays separated. Without `should_wrap` the
/// text is returned as is.
pub fn wrap_text(value: &str, options: &TransformOptions) -> String {
    if !options.should_wrap {
        return value.to_string();
    }

    let words: Vec<&str> = value.split_whitespace().collect();
    if words.is_empty() {
        return if value.is_empty() {
            String::new()
        } else {
            " ".to_string()
        };
    }

    let mut out = String::with_capacity(value.len());
    if value.starts_with(char::is_whitespace) {
        out.push(' ');
    }

    if options.single_line {
        out.push_str(&words.join(" "));
    } else {
        let mut column = out.len();
        for (i, word) in words.iter().enumerate() {
            let len = word.chars().count();
            if i > 0 {
                if column + 1 + len > options.width {
                    out.push('\n');
                    column = 0;
                } else {
                    out.push(' ');
                    column += 1;
                }
            }
            out.push_str(word);
            column += len;
        }
    }

    if value.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out
}

/// Strip trailing line breaks
pub fn trim_trailing_lines(value: &str) -> String {
    value.trim_end_matches(['\n', '\r']).to_string()
}

/// Some nodes like **strong** or _emphasis_ can't have leading/trailing spaces.
/// This function extracts those and returns them as text nodes instead.
///
/// Only a leading and a trailing text child are inspected. Nodes that are
/// whitespace-only, or are neither emphasis nor strong, come back unchanged.
pub fn extract_spacing(node: MdNode) -> Vec<MdNode> {
    let (mut children, rebuild): (Vec<MdNode>, fn(Vec<MdNode>) -> MdNode) = match node {
        MdNode::Emphasis(children) => (children, MdNode::Emphasis),
        MdNode::Strong(children) => (children, MdNode::Strong),
        other => return vec![other],
    };

    let whitespace_only = children
        .iter()
        .all(|c| matches!(c, MdNode::Text(t) if t.trim().is_empty()));
    if whitespace_only {
        return vec![rebuild(children)];
    }

    let mut pre = String::new();
    if let Some(MdNode::Text(first)) = children.first_mut() {
        let cut = first.len() - first.trim_start().len();
        pre = first.drain(..cut).collect();
    }

    let mut post = String::new();
    if let Some(MdNode::Text(last)) = children.last_mut() {
        let keep = last.trim_end().len();
        post = last.split_off(keep);
    }

    children.retain(|c| !matches!(c, MdNode::Text(t) if t.is_empty()));

    let mut out = Vec::with_capacity(3);
    if !pre.is_empty() {
        out.push(MdNode::Text(pre));
    }
    out.push(rebuild(children));
    if !post.is_empty() {
        out.push(MdNode::Text(post));
    }
    out
}

/// Group runs of phrasing content into paragraphs when they sit next to flow
/// content. A purely phrasing sequence is returned unchanged; whitespace-only
/// runs between blocks are dropped.
pub fn wrap(nodes: Vec<MdNode>) -> Vec<MdNode> {
    if nodes.iter().all(MdNode::is_phrasing) {
        return nodes;
    }

    let mut out = Vec::with_capacity(nodes.len());
    let mut run = Vec::new();
    for node in nodes {
        if node.is_phrasing() {
            run.push(node);
        } else {
            flush_run(&mut run, &mut out);
            out.push(node);
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<MdNode>, out: &mut Vec<MdNode>) {
    let blank = run
        .iter()
        .all(|n| matches!(n, MdNode::Text(t) if t.trim().is_empty()));
    if blank {
        run.clear();
    } else {
        out.push(MdNode::Paragraph(std::mem::take(run)));
    }
}

/// Flatten a source subtree to text.
///
/// `br` becomes a newline and comments are skipped. Only elements listed in
/// `allowed` are descended into; any other element is reported as a violation
/// of the text content model.
pub fn to_text(node: &Node, allowed: &[&str]) -> Result<String, StructuralViolation> {
    if let Some(value) = node.value.as_deref().filter(|_| node.is_text()) {
        return Ok(value.to_string());
    }

    let mut out = String::new();
    let mut offending = Vec::new();
    collect_text(node, allowed, &mut out, &mut offending);

    if offending.is_empty() {
        Ok(out)
    } else {
        Err(StructuralViolation::new(MdKind::Text, offending))
    }
}

fn collect_text(node: &Node, allowed: &[&str], out: &mut String, offending: &mut Vec<MdNode>) {
    for child in &node.children {
        match child.node_type {
            NodeType::Text => out.push_str(child.value.as_deref().unwrap_or("")),
            NodeType::Comment => {}
            _ if child.is_tag("br") => out.push('\n'),
            _ if allowed.contains(&child.tag_name()) => collect_text(child, allowed, out, offending),
            _ => offending.push(MdNode::Html(child.outer_html())),
        }
    }
}

/// Collapse whitespace runs, trim and lowercase for loose text comparison
pub fn normalize_for_match(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_lowercase()
}

/// Check if the flattened text of `node` equals `summary`, ignoring case and
/// whitespace differences
pub fn matches_summary(node: &Node, summary: &str) -> bool {
    normalize_for_match(&node.text_content()) == normalize_for_match(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(s: &str) -> MdNode {
        MdNode::Text(s.to_string())
    }

    fn wrapping(width: usize) -> TransformOptions {
        TransformOptions {
            should_wrap: true,
            width,
            ..Default::default()
        }
    }

    #[test]
    fn test_is_block() {
        assert!(is_block("div"));
        assert!(is_block("p"));
        assert!(is_block("DIV"));
        assert!(!is_block("span"));
        assert!(!is_block("a"));
    }

    #[test]
    fn test_is_void() {
        assert!(is_void("br"));
        assert!(is_void("img"));
        assert!(is_void("HR"));
        assert!(!is_void("div"));
    }

    #[test]
    fn test_clean_attribute() {
        assert_eq!(clean_attribute(Some("  a ")), Some("a".to_string()));
        assert_eq!(clean_attribute(Some("  ")), None);
        assert_eq!(clean_attribute(None), None);
    }

    #[test]
    fn test_wrap_text_disabled_is_identity() {
        let options = TransformOptions::default();
        assert_eq!(wrap_text("a  b\n c", &options), "a  b\n c");
    }

    #[test]
    fn test_wrap_text_breaks_between_words() {
        let wrapped = wrap_text("the quick brown fox jumps", &wrapping(10));
        assert_eq!(wrapped, "the quick\nbrown fox\njumps");
    }

    #[test]
    fn test_wrap_text_never_splits_long_words() {
        let wrapped = wrap_text("a supercalifragilistic b", &wrapping(5));
        assert_eq!(wrapped, "a\nsupercalifragilistic\nb");
    }

    #[test]
    fn test_wrap_text_single_line() {
        let options = TransformOptions {
            should_wrap: true,
            single_line: true,
            width: 5,
            ..Default::default()
        };
        assert_eq!(wrap_text("one two\n three", &options), "one two three");
    }

    #[test]
    fn test_wrap_text_keeps_edge_spacing() {
        assert_eq!(wrap_text(" a  b ", &wrapping(80)), " a b ");
        assert_eq!(wrap_text("\n\n", &wrapping(80)), " ");
        assert_eq!(wrap_text("", &wrapping(80)), "");
    }

    #[test]
    fn test_trim_trailing_lines() {
        assert_eq!(trim_trailing_lines("a\nb\n\n"), "a\nb");
        assert_eq!(trim_trailing_lines("a "), "a ");
    }

    #[test]
    fn test_extract_spacing_splits_edges() {
        let out = extract_spacing(MdNode::Emphasis(vec![text(" a ")]));
        assert_eq!(
            out,
            vec![text(" "), MdNode::Emphasis(vec![text("a")]), text(" ")]
        );
    }

    #[test]
    fn test_extract_spacing_without_spaces_is_noop() {
        let node = MdNode::Emphasis(vec![text("a")]);
        assert_eq!(extract_spacing(node.clone()), vec![node]);
    }

    #[test]
    fn test_extract_spacing_whitespace_only_is_noop() {
        let node = MdNode::Strong(vec![text("   ")]);
        assert_eq!(extract_spacing(node.clone()), vec![node]);
    }

    #[test]
    fn test_extract_spacing_only_looks_at_text_edges() {
        let link = MdNode::Link {
            url: "/x".to_string(),
            title: None,
            children: vec![text(" y ")],
        };
        let node = MdNode::Strong(vec![text("  lead"), link.clone()]);
        assert_eq!(
            extract_spacing(node),
            vec![text("  "), MdNode::Strong(vec![text("lead"), link])]
        );
    }

    #[test]
    fn test_extract_spacing_drops_emptied_children() {
        let node = MdNode::Strong(vec![text(" "), MdNode::InlineCode("c".to_string()), text(" ")]);
        assert_eq!(
            extract_spacing(node),
            vec![
                text(" "),
                MdNode::Strong(vec![MdNode::InlineCode("c".to_string())]),
                text(" ")
            ]
        );
    }

    #[test]
    fn test_wrap_groups_phrasing_runs() {
        let out = wrap(vec![
            text("a"),
            MdNode::Strong(vec![text("b")]),
            MdNode::ThematicBreak,
            text(" "),
            MdNode::ThematicBreak,
        ]);
        assert_eq!(
            out,
            vec![
                MdNode::Paragraph(vec![text("a"), MdNode::Strong(vec![text("b")])]),
                MdNode::ThematicBreak,
                MdNode::ThematicBreak,
            ]
        );
    }

    #[test]
    fn test_wrap_leaves_phrasing_alone() {
        let nodes = vec![text("a"), MdNode::Break, text("b")];
        assert_eq!(wrap(nodes.clone()), nodes);
    }

    #[test]
    fn test_to_text_allows_listed_elements() {
        let code = Node::element("code")
            .with_text("let ")
            .with_child(Node::element("var").with_text("x"))
            .with_child(Node::element("br"))
            .with_text("= 1");
        assert_eq!(to_text(&code, &["var"]).unwrap(), "let x\n= 1");
    }

    #[test]
    fn test_to_text_rejects_other_elements() {
        let code = Node::element("code").with_child(Node::element("em").with_text("x"));
        let err = to_text(&code, &["var"]).unwrap_err();
        assert_eq!(err.target, MdKind::Text);
        assert_eq!(err.offending, vec![MdNode::Html("<em>x</em>".to_string())]);
    }

    #[test]
    fn test_matches_summary() {
        let p = Node::element("p")
            .with_text("The  Summary ")
            .with_child(Node::element("em").with_text("text"));
        assert!(matches_summary(&p, "the summary\ntext"));
        assert!(!matches_summary(&p, "other"));
    }

    proptest! {
        #[test]
        fn wrap_text_is_idempotent(s in "[ a-z\\n\\t]{0,120}", width in 0usize..40) {
            let options = wrapping(width);
            let once = wrap_text(&s, &options);
            prop_assert_eq!(wrap_text(&once, &options), once);
        }

        #[test]
        fn single_line_wrap_has_no_newlines(s in "[ a-z\\n]{0,80}") {
            let options = TransformOptions {
                should_wrap: true,
                single_line: true,
                ..Default::default()
            };
            prop_assert!(!wrap_text(&s, &options).contains('\n'));
        }
    }
}
