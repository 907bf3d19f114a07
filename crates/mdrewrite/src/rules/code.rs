//! Inline code and code block rules.

use mdrewrite_core::MdNode;

use super::{emit, emit_all, HandlerResult, Query, Rule, Shape};
use crate::node::Node;
use crate::utilities::{clean_attribute, to_text, trim_trailing_lines, wrap_text};

/// Languages recognized in highlighter classes of `pre` elements
const BRUSH_LANGUAGES: &[&str] = &[
    "js", "html", "css", "json", "svg", "plain", "cpp", "java", "bash", "php", "xml", "glsl",
    "python", "sql", "example-good", "example-bad",
];

/// Highlighter classes a language-tagged `pre` may carry besides the language
const BRUSH_EXTRA_CLASSES: &[&str] = &[
    "brush:", "brush", "example-good", "example-bad", "hidden", "no-line-numbers",
    "line-numbers", "notranslate", "language-css",
];

/// Create all code rules, in precedence order
pub fn code_rules() -> Vec<Rule> {
    let mut rules = vec![linked_code_rule(), inline_code_rule(), plain_pre_rule()];
    rules.extend(BRUSH_LANGUAGES.iter().copied().flat_map(brush_rules));
    rules
}

/// `<code><a href="/x">y</a></code>` reads better as a link around code than
/// as code around a link, and the same goes for `strong`
fn linked_code_rule() -> Rule {
    Rule::handle(
        Query::predicate(|node| {
            node.is_tag("code")
                && node.children.len() == 1
                && (node.children[0].is_tag("a") || node.children[0].is_tag("strong"))
        }),
        |node, _, _| {
            let mut out = Vec::with_capacity(node.children.len());
            for child in &node.children {
                let code = MdNode::InlineCode(to_text(child, &[])?);
                out.push(if child.is_tag("a") {
                    MdNode::link(
                        child.attr("href").unwrap_or_default().to_string(),
                        clean_attribute(child.attr("title")),
                        vec![code],
                    )?
                } else {
                    MdNode::strong(vec![code])?
                });
            }
            emit_all(out)
        },
    )
}

fn inline_code_rule() -> Rule {
    Rule::handle(Query::tag("code"), |node, _, options| {
        let target = match node.children.as_slice() {
            [only] if only.is_tag("var") => only,
            _ => node,
        };
        let text = to_text(target, &["var"])?;
        emit(MdNode::InlineCode(trim_trailing_lines(&wrap_text(
            &text, options,
        ))))
    })
}

/// A `pre` without a language class; the language may come from an inner
/// `code` element's `language-*` class
fn plain_pre_rule() -> Rule {
    Rule::handle(
        Shape::is(&["pre"]).can_have_class(&["eval", "notranslate", "syntaxbox"]),
        |node, _, _| emit(code_block(node)),
    )
}

fn code_block(node: &Node) -> MdNode {
    let lang = node
        .element_children()
        .find(|c| c.is_tag("code") && !c.class_names().is_empty())
        .and_then(|code| {
            code.class_names().iter().find_map(|class| {
                class
                    .strip_prefix("language-")
                    .or_else(|| class.strip_prefix("lang-"))
                    .map(str::to_string)
            })
        });

    MdNode::Code {
        lang,
        meta: None,
        value: trim_trailing_lines(&node.text_content()),
    }
}

/// One rule per spelling of the language class: `brush:js`, `brush:js;`,
/// `js` and `js;`
fn brush_rules(lang: &'static str) -> Vec<Rule> {
    [
        format!("brush:{}", lang),
        format!("brush:{};", lang),
        lang.to_string(),
        format!("{};", lang),
    ]
    .into_iter()
    .map(|class| {
        Rule::handle(
            Shape::is(&["pre"])
                .has_class(&[class.as_str()])
                .can_have_class(BRUSH_EXTRA_CLASSES)
                .can_have_class_matching(|c| c.starts_with("highlight"))
                .can_have_class_matching(|c| c.starts_with('[') && c.ends_with(']')),
            move |node, _, _| brush_code_block(node, lang),
        )
    })
    .collect()
}

fn brush_code_block(node: &Node, lang: &str) -> HandlerResult {
    let value = trim_trailing_lines(&to_text(node, &["var"])?);

    let lang = if lang.starts_with("example") {
        "plain"
    } else {
        lang
    };

    let meta = node
        .class_names()
        .iter()
        .filter(|c| c.starts_with("example-") || c.as_str() == "hidden")
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    emit(MdNode::Code {
        lang: Some(lang.to_string()),
        meta: Some(meta).filter(|m| !m.is_empty()),
        value,
    })
}
