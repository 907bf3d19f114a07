//! Shape-checked construction of Markdown nodes
//!
//! Every constructor validates its children against the variant's content
//! model and reports the children that do not fit as a [`StructuralViolation`].

use crate::ast::{ListItem, MdKind, MdNode, TableCell, TableRow};

/// Children that do not fit the content model of the variant being built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot build `{target}`: {} unexpected child node(s)", offending.len())]
pub struct StructuralViolation {
    /// The variant that was being built
    pub target: MdKind,
    /// The children that broke its contract
    pub offending: Vec<MdNode>,
}

impl StructuralViolation {
    pub fn new(target: MdKind, offending: Vec<MdNode>) -> Self {
        Self { target, offending }
    }
}

pub type BuildResult = Result<MdNode, StructuralViolation>;

/// Deepest heading the document model supports
pub const MAX_HEADING_DEPTH: u8 = 5;

impl MdNode {
    /// Build the named variant from already transformed children.
    ///
    /// Attribute-carrying variants get neutral attributes (depth 1, empty URL,
    /// unordered list). Leaf variants that carry a value take the plain text of
    /// the children; `Image` cannot be built from children at all.
    pub fn build(kind: MdKind, children: Vec<MdNode>) -> BuildResult {
        match kind {
            MdKind::Root => Ok(MdNode::Root(children)),
            MdKind::Text => Ok(MdNode::Text(plain_text(&children))),
            MdKind::Html => Ok(MdNode::Html(plain_text(&children))),
            MdKind::InlineCode => Ok(MdNode::InlineCode(plain_text(&children))),
            MdKind::Code => Ok(MdNode::Code {
                lang: None,
                meta: None,
                value: plain_text(&children),
            }),
            MdKind::Heading => MdNode::heading(1, children),
            MdKind::Paragraph => MdNode::paragraph(children),
            MdKind::Emphasis => MdNode::emphasis(children),
            MdKind::Strong => MdNode::strong(children),
            MdKind::Link => MdNode::link(String::new(), None, children),
            MdKind::Image => Err(StructuralViolation::new(kind, children)),
            MdKind::List => MdNode::list(false, None, children),
            MdKind::ListItem => Ok(MdNode::list_item(children)),
            MdKind::Blockquote => Ok(MdNode::Blockquote(children)),
            MdKind::Break => empty(kind, children, MdNode::Break),
            MdKind::ThematicBreak => empty(kind, children, MdNode::ThematicBreak),
            MdKind::DefinitionList => MdNode::definition_list(children),
            MdKind::DefinitionTerm => MdNode::definition_term(children),
            MdKind::DefinitionDescription => Ok(MdNode::DefinitionDescription(children)),
            MdKind::Table => MdNode::table(children),
            MdKind::TableRow => MdNode::table_row(children),
            MdKind::TableCell => MdNode::table_cell(false, children),
        }
    }

    /// Heading; the depth is clamped to `1..=MAX_HEADING_DEPTH`
    pub fn heading(depth: u8, children: Vec<MdNode>) -> BuildResult {
        let children = phrasing(MdKind::Heading, children)?;
        Ok(MdNode::Heading {
            depth: depth.clamp(1, MAX_HEADING_DEPTH),
            children,
        })
    }

    pub fn paragraph(children: Vec<MdNode>) -> BuildResult {
        phrasing(MdKind::Paragraph, children).map(MdNode::Paragraph)
    }

    pub fn emphasis(children: Vec<MdNode>) -> BuildResult {
        phrasing(MdKind::Emphasis, children).map(MdNode::Emphasis)
    }

    pub fn strong(children: Vec<MdNode>) -> BuildResult {
        phrasing(MdKind::Strong, children).map(MdNode::Strong)
    }

    pub fn link(url: String, title: Option<String>, children: Vec<MdNode>) -> BuildResult {
        let children = phrasing(MdKind::Link, children)?;
        Ok(MdNode::Link {
            url,
            title,
            children,
        })
    }

    /// List; every child must be a list item
    pub fn list(ordered: bool, start: Option<u32>, children: Vec<MdNode>) -> BuildResult {
        let items = only(MdKind::List, children, |child| match child {
            MdNode::ListItem(item) => Ok(item),
            other => Err(other),
        })?;
        let spread = items.iter().any(|i| i.spread);
        Ok(MdNode::List {
            ordered,
            start,
            spread,
            items,
        })
    }

    /// List item; spread when it holds more than one child
    pub fn list_item(children: Vec<MdNode>) -> MdNode {
        MdNode::ListItem(ListItem::new(children.len() > 1, children))
    }

    /// Table; every child must be a row
    pub fn table(children: Vec<MdNode>) -> BuildResult {
        let rows = only(MdKind::Table, children, |child| match child {
            MdNode::TableRow(row) => Ok(row),
            other => Err(other),
        })?;
        Ok(MdNode::Table { rows })
    }

    /// Table row; every child must be a cell
    pub fn table_row(children: Vec<MdNode>) -> BuildResult {
        let cells = only(MdKind::TableRow, children, |child| match child {
            MdNode::TableCell(cell) => Ok(cell),
            other => Err(other),
        })?;
        Ok(MdNode::TableRow(TableRow { cells }))
    }

    pub fn table_cell(header: bool, children: Vec<MdNode>) -> BuildResult {
        let children = phrasing(MdKind::TableCell, children)?;
        Ok(MdNode::TableCell(TableCell { header, children }))
    }

    /// Definition list; children must be terms or descriptions
    pub fn definition_list(children: Vec<MdNode>) -> BuildResult {
        let offending: Vec<MdNode> = children
            .iter()
            .filter(|c| {
                !matches!(
                    c,
                    MdNode::DefinitionTerm(_) | MdNode::DefinitionDescription(_)
                )
            })
            .cloned()
            .collect();
        if offending.is_empty() {
            Ok(MdNode::DefinitionList(children))
        } else {
            Err(StructuralViolation::new(MdKind::DefinitionList, offending))
        }
    }

    pub fn definition_term(children: Vec<MdNode>) -> BuildResult {
        phrasing(MdKind::DefinitionTerm, children).map(MdNode::DefinitionTerm)
    }
}

/// Accept the children only if they are all phrasing content
fn phrasing(target: MdKind, children: Vec<MdNode>) -> Result<Vec<MdNode>, StructuralViolation> {
    if children.iter().all(MdNode::is_phrasing) {
        return Ok(children);
    }
    let offending = children.into_iter().filter(|c| !c.is_phrasing()).collect();
    Err(StructuralViolation::new(target, offending))
}

/// Unwrap every child with `select`; collect the rejects as the violation
fn only<T>(
    target: MdKind,
    children: Vec<MdNode>,
    select: impl Fn(MdNode) -> Result<T, MdNode>,
) -> Result<Vec<T>, StructuralViolation> {
    let mut accepted = Vec::with_capacity(children.len());
    let mut offending = Vec::new();
    for child in children {
        match select(child) {
            Ok(value) => accepted.push(value),
            Err(reject) => offending.push(reject),
        }
    }
    if offending.is_empty() {
        Ok(accepted)
    } else {
        Err(StructuralViolation::new(target, offending))
    }
}

fn empty(target: MdKind, children: Vec<MdNode>, node: MdNode) -> BuildResult {
    if children.is_empty() {
        Ok(node)
    } else {
        Err(StructuralViolation::new(target, children))
    }
}

fn plain_text(children: &[MdNode]) -> String {
    children.iter().map(MdNode::text_content).collect()
}
