//! Markdown Abstract Syntax Tree
//!
//! This module defines the target nodes produced by the rewriting engine.
//! Variants that only admit one kind of child (lists, tables, rows) hold that
//! child type directly, so the shape contract cannot be broken after
//! construction.

use std::fmt;

/// A node of the Markdown document tree
#[derive(Debug, Clone, PartialEq)]
pub enum MdNode {
    /// Root document container
    Root(Vec<MdNode>),

    /// Plain text
    Text(String),

    /// Raw markup passed through untouched
    Html(String),

    /// Heading with depth (1-5) and phrasing content
    Heading { depth: u8, children: Vec<MdNode> },

    /// Paragraph containing phrasing content
    Paragraph(Vec<MdNode>),

    /// Emphasis (italic)
    Emphasis(Vec<MdNode>),

    /// Strong emphasis (bold)
    Strong(Vec<MdNode>),

    /// Link with URL, optional title and phrasing content
    Link {
        url: String,
        title: Option<String>,
        children: Vec<MdNode>,
    },

    /// Image with URL, optional title and alt text
    Image {
        url: String,
        title: Option<String>,
        alt: String,
    },

    /// List (ordered or unordered)
    List {
        ordered: bool,
        start: Option<u32>,
        spread: bool,
        items: Vec<ListItem>,
    },

    /// A list item outside of its list, as returned by an `li` handler
    ListItem(ListItem),

    /// Code block
    Code {
        lang: Option<String>,
        meta: Option<String>,
        value: String,
    },

    /// Inline code
    InlineCode(String),

    /// Block quote containing flow content
    Blockquote(Vec<MdNode>),

    /// Hard line break
    Break,

    /// Thematic break (horizontal rule)
    ThematicBreak,

    /// Definition list holding terms and descriptions
    DefinitionList(Vec<MdNode>),

    /// Term of a definition list
    DefinitionTerm(Vec<MdNode>),

    /// Description of a definition list
    DefinitionDescription(Vec<MdNode>),

    /// Table made of rows
    Table { rows: Vec<TableRow> },

    /// A table row outside of its table
    TableRow(TableRow),

    /// A table cell outside of its row
    TableCell(TableCell),
}

/// A list item containing flow content
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub spread: bool,
    pub children: Vec<MdNode>,
}

impl ListItem {
    pub fn new(spread: bool, children: Vec<MdNode>) -> Self {
        Self { spread, children }
    }
}

/// A table row made of cells
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A table cell containing phrasing content
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub header: bool,
    pub children: Vec<MdNode>,
}

/// Names of the target variants.
///
/// A rule can name one of these instead of providing a handler; the engine
/// then builds that variant from the transformed children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MdKind {
    Root,
    Text,
    Html,
    Heading,
    Paragraph,
    Emphasis,
    Strong,
    Link,
    Image,
    List,
    ListItem,
    Code,
    InlineCode,
    Blockquote,
    Break,
    ThematicBreak,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Table,
    TableRow,
    TableCell,
}

impl MdKind {
    /// The mdast type name of this variant
    pub fn as_str(self) -> &'static str {
        match self {
            MdKind::Root => "root",
            MdKind::Text => "text",
            MdKind::Html => "html",
            MdKind::Heading => "heading",
            MdKind::Paragraph => "paragraph",
            MdKind::Emphasis => "emphasis",
            MdKind::Strong => "strong",
            MdKind::Link => "link",
            MdKind::Image => "image",
            MdKind::List => "list",
            MdKind::ListItem => "listItem",
            MdKind::Code => "code",
            MdKind::InlineCode => "inlineCode",
            MdKind::Blockquote => "blockquote",
            MdKind::Break => "break",
            MdKind::ThematicBreak => "thematicBreak",
            MdKind::DefinitionList => "definitionList",
            MdKind::DefinitionTerm => "definitionTerm",
            MdKind::DefinitionDescription => "definitionDescription",
            MdKind::Table => "table",
            MdKind::TableRow => "tableRow",
            MdKind::TableCell => "tableCell",
        }
    }
}

impl fmt::Display for MdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MdNode {
    /// The variant name of this node
    pub fn kind(&self) -> MdKind {
        match self {
            MdNode::Root(_) => MdKind::Root,
            MdNode::Text(_) => MdKind::Text,
            MdNode::Html(_) => MdKind::Html,
            MdNode::Heading { .. } => MdKind::Heading,
            MdNode::Paragraph(_) => MdKind::Paragraph,
            MdNode::Emphasis(_) => MdKind::Emphasis,
            MdNode::Strong(_) => MdKind::Strong,
            MdNode::Link { .. } => MdKind::Link,
            MdNode::Image { .. } => MdKind::Image,
            MdNode::List { .. } => MdKind::List,
            MdNode::ListItem(_) => MdKind::ListItem,
            MdNode::Code { .. } => MdKind::Code,
            MdNode::InlineCode(_) => MdKind::InlineCode,
            MdNode::Blockquote(_) => MdKind::Blockquote,
            MdNode::Break => MdKind::Break,
            MdNode::ThematicBreak => MdKind::ThematicBreak,
            MdNode::DefinitionList(_) => MdKind::DefinitionList,
            MdNode::DefinitionTerm(_) => MdKind::DefinitionTerm,
            MdNode::DefinitionDescription(_) => MdKind::DefinitionDescription,
            MdNode::Table { .. } => MdKind::Table,
            MdNode::TableRow(_) => MdKind::TableRow,
            MdNode::TableCell(_) => MdKind::TableCell,
        }
    }

    /// Check if this node is phrasing (inline) content
    pub fn is_phrasing(&self) -> bool {
        matches!(
            self,
            MdNode::Text(_)
                | MdNode::Html(_)
                | MdNode::Emphasis(_)
                | MdNode::Strong(_)
                | MdNode::Link { .. }
                | MdNode::Image { .. }
                | MdNode::InlineCode(_)
                | MdNode::Break
        )
    }

    /// Get the plain text carried by this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            MdNode::Text(text)
            | MdNode::Html(text)
            | MdNode::InlineCode(text)
            | MdNode::Code { value: text, .. } => out.push_str(text),
            MdNode::Image { alt, .. } => out.push_str(alt),
            MdNode::Break => out.push('\n'),
            MdNode::ThematicBreak => {}
            MdNode::Root(children)
            | MdNode::Paragraph(children)
            | MdNode::Emphasis(children)
            | MdNode::Strong(children)
            | MdNode::Blockquote(children)
            | MdNode::DefinitionList(children)
            | MdNode::DefinitionTerm(children)
            | MdNode::DefinitionDescription(children)
            | MdNode::Heading { children, .. }
            | MdNode::Link { children, .. } => children.iter().for_each(|c| c.push_text(out)),
            MdNode::ListItem(item) => item.children.iter().for_each(|c| c.push_text(out)),
            MdNode::List { items, .. } => items
                .iter()
                .flat_map(|i| i.children.iter())
                .for_each(|c| c.push_text(out)),
            MdNode::Table { rows } => rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .flat_map(|c| c.children.iter())
                .for_each(|c| c.push_text(out)),
            MdNode::TableRow(row) => row
                .cells
                .iter()
                .flat_map(|c| c.children.iter())
                .for_each(|c| c.push_text(out)),
            MdNode::TableCell(cell) => cell.children.iter().for_each(|c| c.push_text(out)),
        }
    }
}
