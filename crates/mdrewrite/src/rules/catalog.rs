//! The default rule set for MDN-style documentation markup.
//!
//! Rules are tried in order and the first match wins, so narrower rules must
//! come before broader ones for the same tag.

use mdrewrite_core::{MdKind, MdNode};

use super::code::code_rules;
use super::definitions::definition_rules;
use super::notecards::notecard_rules;
use super::tables::table_rules;
use super::{emit, emit_all, HandlerResult, Query, Rule, RuleTable, Shape};
use crate::node::{Node, NodeType};
use crate::options::{OptionsPatch, TransformOptions};
use crate::transform::Children;
use crate::utilities::{clean_attribute, extract_spacing, matches_summary, wrap, wrap_text};

/// Build the default rule table
pub fn default_rules() -> RuleTable {
    let mut table = RuleTable::new();
    table
        .extend(node_type_rules())
        .extend(table_rules())
        .extend(notecard_rules())
        .extend(structure_rules())
        .extend(inline_rules())
        .extend(code_rules())
        .extend(media_rules())
        .extend(emphasis_rules())
        .extend(definition_rules())
        .extend(summary_rules())
        .extend(annotation_rules());
    table
}

fn node_type_rules() -> Vec<Rule> {
    vec![
        Rule::rename(
            Query::predicate(|node| node.node_type == NodeType::Root),
            MdKind::Root,
        ),
        Rule::handle(Query::predicate(Node::is_text), |node, _, options| {
            emit(MdNode::Text(wrap_text(node.value.as_deref().unwrap_or(""), options)))
        }),
        Rule::handle(
            Query::predicate(|node| node.node_type == NodeType::Comment),
            |node, _, options| {
                let value = wrap_text(node.value.as_deref().unwrap_or(""), options);
                emit(MdNode::Html(format!("<!--{}-->", value)))
            },
        ),
    ]
}

fn structure_rules() -> Vec<Rule> {
    vec![
        Rule::handle(Query::tags(&["html", "head", "body"]), |node, t, _| {
            Ok(Some(wrap(t.transform(node)?)))
        }),
        Rule::handle(
            Shape::is(&["h1", "h2", "h3", "h4", "h5"])
                .can_have(&["id"])
                .can_have_class(&["example", "name", "highlight-spanned"]),
            |node, t, _| {
                let depth = node.tag_name()[1..].parse().unwrap_or(1);
                let content = t.transform_with(node, &OptionsPatch::single_line())?;
                emit(MdNode::heading(depth, content)?)
            },
        ),
        Rule::handle(
            Shape::is(&["div"]).can_have_class(&["twocolumns", "threecolumns", "noinclude"]),
            |node, t, _| Ok(Some(t.transform(node)?)),
        ),
        Rule::handle(
            Shape::is(&["span", "small"]).can_have(&["id"]).can_have_class(&[
                "pl-s",
                "highlight-span",
                "objectBox",
                "objectBox-string",
                "devtools-monospace",
                "message-body",
                "message-flex-body",
                "message-body-wrapper",
                "blob-code-inner",
                "blob-code-marker",
            ]),
            |node, t, _| Ok(Some(t.transform(node)?)),
        ),
        Rule::rename(
            Shape::is(&["p"]).can_have_class(&["brush:", "js"]),
            MdKind::Paragraph,
        ),
        Rule::handle(Query::tag("br"), |node, _, options| emit(line_break(node, options))),
    ]
}

/// A `br` only becomes a hard break when text is being re-flowed; otherwise
/// the newline itself is enough
fn line_break(node: &Node, options: &TransformOptions) -> MdNode {
    match (options.should_wrap, options.single_line) {
        (true, true) => MdNode::Html(node.outer_html()),
        (true, false) => MdNode::Break,
        (false, _) => MdNode::Text("\n".to_string()),
    }
}

fn inline_rules() -> Vec<Rule> {
    vec![
        Rule::handle(
            Shape::is(&["a"])
                .has(&["href"])
                .can_have(&["title", "rel", "target"])
                .can_have_class(&["link-https", "mw-redirect", "external", "external-icon"]),
            |node, t, _| {
                let url = node.attr("href").unwrap_or_default().to_string();
                let title = clean_attribute(node.attr("title"));
                emit(MdNode::link(url, title, t.transform(node)?)?)
            },
        ),
        Rule::handle(
            Shape::is(&["ul", "ol"])
                .can_have(&["start"])
                .can_have_class(&["threecolumns"]),
            |node, t, _| {
                let ordered = node.is_tag("ol");
                let start = ordered.then(|| {
                    node.attr("start")
                        .and_then(|s| s.trim().parse().ok())
                        .filter(|&start: &u32| start != 0)
                        .unwrap_or(1)
                });
                emit(MdNode::list(ordered, start, t.transform(node)?)?)
            },
        ),
        Rule::handle(Shape::is(&["li"]).can_have(&["id"]), |node, t, _| {
            emit(MdNode::list_item(wrap(t.transform(node)?)))
        }),
    ]
}

fn media_rules() -> Vec<Rule> {
    vec![
        Rule::handle(
            Shape::is(&["img"])
                .has(&["src"])
                .can_have(&["title", "alt"])
                .can_have_class(&["internal"]),
            |node, _, _| {
                emit(MdNode::Image {
                    url: node.attr("src").unwrap_or_default().to_string(),
                    title: clean_attribute(node.attr("title")),
                    alt: node.attr("alt").unwrap_or_default().to_string(),
                })
            },
        ),
        // No Markdown equivalent; keep the markup
        Rule::handle(Shape::is(&["math"]).can_have(&["display"]), |node, _, _| {
            emit(MdNode::Html(node.outer_html()))
        }),
        Rule::handle(Query::tag("blockquote"), |node, t, _| {
            emit(MdNode::Blockquote(wrap(t.transform(node)?)))
        }),
    ]
}

fn emphasis_rules() -> Vec<Rule> {
    vec![
        Rule::handle(Shape::is(&["i", "em"]), |node, t, _| {
            emit_all(extract_spacing(MdNode::emphasis(t.transform(node)?)?))
        }),
        Rule::handle(Shape::is(&["b", "strong"]), |node, t, _| {
            emit_all(extract_spacing(MdNode::strong(t.transform(node)?)?))
        }),
        Rule::handle(Query::tag("q"), |node, t, _| {
            let mut out = vec![MdNode::Text("\"".to_string())];
            out.extend(t.transform(node)?);
            out.push(MdNode::Text("\"".to_string()));
            emit_all(out)
        }),
    ]
}

fn summary_rules() -> Vec<Rule> {
    ["summary", "seoSummary"]
        .into_iter()
        .map(|class| Rule::handle(Shape::new().has_class(&[class]), summary))
        .collect()
}

/// A summary block is only accepted when its text is the page summary given
/// in the options; a `div` or `p` summary collapses into one paragraph
fn summary<'a>(node: &'a Node, t: &mut Children<'a>, options: &TransformOptions) -> HandlerResult {
    let Some(expected) = options.summary.as_deref() else {
        return Ok(None);
    };
    if !matches_summary(node, expected) {
        return Ok(None);
    }

    let content = t.transform(node)?;
    if !(node.is_tag("div") || node.is_tag("p")) {
        return emit_all(content);
    }

    let flattened = content
        .into_iter()
        .flat_map(|child| match child {
            MdNode::Paragraph(children) => children,
            other => vec![other],
        })
        .collect();
    emit(MdNode::paragraph(flattened)?)
}

fn annotation_rules() -> Vec<Rule> {
    vec![
        Rule::handle(Query::tags(&["var", "dfn"]), |node, t, _| {
            emit(MdNode::emphasis(t.transform(node)?)?)
        }),
        Rule::handle(Shape::is(&["abbr"]).can_have(&["title"]), |node, t, _| {
            Ok(Some(t.transform(node)?))
        }),
        Rule::handle(Shape::is(&["hr"]), |_, _, _| emit(MdNode::ThematicBreak)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Transformed, Transformer};
    use mdrewrite_core::ListItem;

    fn run<'a>(node: &'a Node, options: &TransformOptions) -> Transformed<'a> {
        Transformer::new(crate::rules::rule_table())
            .transform(node, options)
            .unwrap()
    }

    fn clean(node: &Node) -> Vec<MdNode> {
        let out = run(node, &TransformOptions::default());
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        out.nodes
    }

    fn text(s: &str) -> MdNode {
        MdNode::Text(s.to_string())
    }

    #[test]
    fn test_heading_levels() {
        for (tag, depth) in [("h1", 1), ("h3", 3), ("h5", 5)] {
            let node = Node::element_with_attrs(tag, vec![("id", "x")]).with_text("Title");
            assert_eq!(
                clean(&node),
                vec![MdNode::Heading {
                    depth,
                    children: vec![text("Title")]
                }]
            );
        }
        let h6 = Node::element("h6").with_text("Too deep");
        assert_eq!(run(&h6, &TransformOptions::default()).diagnostics.unhandled, vec![&h6]);
    }

    #[test]
    fn test_heading_text_is_single_line() {
        let node = Node::element("h2").with_text("Multi\nline");
        assert_eq!(
            clean(&node),
            vec![MdNode::Heading {
                depth: 2,
                children: vec![text("Multi line")]
            }]
        );
    }

    #[test]
    fn test_link_and_title() {
        let node = Node::element_with_attrs(
            "a",
            vec![("href", "/docs"), ("title", "  Docs page "), ("class", "external")],
        )
        .with_text("docs");
        assert_eq!(
            clean(&node),
            vec![MdNode::Link {
                url: "/docs".to_string(),
                title: Some("Docs page".to_string()),
                children: vec![text("docs")],
            }]
        );
    }

    #[test]
    fn test_anchor_without_href_is_unhandled() {
        let node = Node::element_with_attrs("a", vec![("name", "top")]);
        let out = run(&node, &TransformOptions::default());
        assert_eq!(out.diagnostics.unhandled, vec![&node]);
        assert_eq!(out.nodes, vec![MdNode::Html("<a name=\"top\"></a>".to_string())]);
    }

    #[test]
    fn test_ordered_list_with_start() {
        let node = Node::element_with_attrs("ol", vec![("start", "3")])
            .with_child(Node::element("li").with_text("three"))
            .with_child(
                Node::element("li")
                    .with_text("four")
                    .with_child(Node::element("p").with_text("more")),
            );
        assert_eq!(
            clean(&node),
            vec![MdNode::List {
                ordered: true,
                start: Some(3),
                spread: true,
                items: vec![
                    ListItem::new(false, vec![text("three")]),
                    ListItem::new(
                        true,
                        vec![
                            MdNode::Paragraph(vec![text("four")]),
                            MdNode::Paragraph(vec![text("more")]),
                        ]
                    ),
                ],
            }]
        );
    }

    #[test]
    fn test_ordered_list_start_falls_back_to_one() {
        for start in ["0", "x"] {
            let node = Node::element_with_attrs("ol", vec![("start", start)]);
            match clean(&node).as_slice() {
                [MdNode::List { start, .. }] => assert_eq!(*start, Some(1)),
                other => panic!("unexpected {:?}", other),
            }
        }
        match clean(&Node::element("ul")).as_slice() {
            [MdNode::List { start, .. }] => assert_eq!(*start, None),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_list_with_stray_child_is_invalid() {
        let node = Node::element("ul").with_child(Node::element("p").with_text("x"));
        let out = run(&node, &TransformOptions::default());
        assert_eq!(out.diagnostics.invalid.len(), 1);
        assert_eq!(out.diagnostics.invalid[0].target, MdKind::List);
    }

    #[test]
    fn test_emphasis_moves_spacing_outside() {
        let node = Node::element("p")
            .with_text("a")
            .with_child(Node::element("em").with_text(" b "))
            .with_text("c");
        assert_eq!(
            clean(&node),
            vec![MdNode::Paragraph(vec![
                text("a"),
                text(" "),
                MdNode::Emphasis(vec![text("b")]),
                text(" "),
                text("c"),
            ])]
        );
    }

    #[test]
    fn test_quote_and_annotations() {
        let node = Node::element("p")
            .with_child(Node::element("q").with_text("hi"))
            .with_child(Node::element("var").with_text("x"))
            .with_child(Node::element_with_attrs("abbr", vec![("title", "HyperText")]).with_text("HT"));
        assert_eq!(
            clean(&node),
            vec![MdNode::Paragraph(vec![
                text("\""),
                text("hi"),
                text("\""),
                MdNode::Emphasis(vec![text("x")]),
                text("HT"),
            ])]
        );
    }

    #[test]
    fn test_line_break_depends_on_wrapping() {
        let br = Node::element("br");
        assert_eq!(clean(&br), vec![text("\n")]);

        let wrapping = TransformOptions {
            should_wrap: true,
            ..Default::default()
        };
        assert_eq!(run(&br, &wrapping).nodes, vec![MdNode::Break]);
        assert_eq!(
            run(&br, &wrapping.merge(&OptionsPatch::single_line())).nodes,
            vec![MdNode::Html("<br>".to_string())]
        );
    }

    #[test]
    fn test_image() {
        let node = Node::element_with_attrs("img", vec![("src", "a.png"), ("alt", "An A")]);
        assert_eq!(
            clean(&node),
            vec![MdNode::Image {
                url: "a.png".to_string(),
                title: None,
                alt: "An A".to_string(),
            }]
        );
    }

    #[test]
    fn test_math_and_comment_kept_as_markup() {
        let root = Node::root()
            .with_child(Node::comment("note"))
            .with_child(Node::element_with_attrs("math", vec![("display", "block")]).with_text("x"));
        assert_eq!(
            clean(&root),
            vec![MdNode::Root(vec![
                MdNode::Html("<!--note-->".to_string()),
                MdNode::Html("<math display=\"block\">x</math>".to_string()),
            ])]
        );
    }

    #[test]
    fn test_summary_requires_matching_option() {
        let node = Node::element_with_attrs("div", vec![("class", "summary")])
            .with_child(Node::element("p").with_text("The  Summary"));

        let declined = run(&node, &TransformOptions::default());
        assert_eq!(declined.diagnostics.unhandled, vec![&node]);

        let other = TransformOptions {
            summary: Some("Something else".to_string()),
            ..Default::default()
        };
        assert_eq!(run(&node, &other).diagnostics.unhandled, vec![&node]);

        let matching = TransformOptions {
            summary: Some("the summary".to_string()),
            ..Default::default()
        };
        let out = run(&node, &matching);
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.nodes, vec![MdNode::Paragraph(vec![text("The  Summary")])]);
    }

    #[test]
    fn test_document_wrapper_groups_paragraphs() {
        let body = Node::element("body")
            .with_text("loose")
            .with_child(Node::element("hr"))
            .with_child(Node::element("blockquote").with_text("quoted"));
        assert_eq!(
            clean(&body),
            vec![
                MdNode::Paragraph(vec![text("loose")]),
                MdNode::ThematicBreak,
                MdNode::Blockquote(vec![text("quoted")]),
            ]
        );
    }
}
