//! Source element tree.
//!
//! This module provides the parsed-markup node structure the rule table matches
//! against. Any upstream parser can convert its output to this structure.
//! Class names are kept as an ordered token list, every other attribute as a
//! single string, in document order.

use indexmap::IndexMap;

/// Node types of the source tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node with a tag, attributes and children
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document root
    Root,
}

/// An attribute value: plain string, or a token list for `class`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Str(String),
    List(Vec<String>),
}

impl AttrValue {
    /// The value as it appears in markup
    pub fn to_markup(&self) -> String {
        match self {
            AttrValue::Str(s) => s.clone(),
            AttrValue::List(tokens) => tokens.join(" "),
        }
    }
}

/// A node of the source element tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_type: NodeType,

    /// Lowercase tag name, elements only
    pub tag: Option<String>,

    /// Attributes in document order
    pub attributes: IndexMap<String, AttrValue>,

    /// Child nodes
    pub children: Vec<Node>,

    /// Raw value of text and comment nodes
    pub value: Option<String>,
}

impl Node {
    fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            tag: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
            value: None,
        }
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            tag: Some(tag_name.to_lowercase()),
            ..Self::new(NodeType::Element)
        }
    }

    /// Create a new element node with attributes.
    ///
    /// A `class` attribute is split on whitespace into its tokens.
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            value: Some(content.to_string()),
            ..Self::new(NodeType::Text)
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            value: Some(content.to_string()),
            ..Self::new(NodeType::Comment)
        }
    }

    /// Create a document root node
    pub fn root() -> Self {
        Self::new(NodeType::Root)
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text child append
    pub fn with_text(self, content: &str) -> Self {
        self.with_child(Node::text(content))
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Check if this is an element with the given tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    /// Get the tag name, empty for non-elements
    pub fn tag_name(&self) -> &str {
        self.tag.as_deref().unwrap_or("")
    }

    /// Get a non-class attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self.attributes.get(&name.to_lowercase())? {
            AttrValue::Str(s) => Some(s.as_str()),
            AttrValue::List(_) => None,
        }
    }

    /// Names of every attribute except `class`
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .keys()
            .map(String::as_str)
            .filter(|name| *name != "class")
    }

    /// Class tokens in document order
    pub fn class_names(&self) -> &[String] {
        match self.attributes.get("class") {
            Some(AttrValue::List(tokens)) => tokens.as_slice(),
            _ => &[],
        }
    }

    /// Check if a class token is present
    pub fn has_class(&self, class: &str) -> bool {
        self.class_names().iter().any(|c| c == class)
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|n| n.is_element())
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_lowercase();
        let value = if name == "class" {
            AttrValue::List(value.split_whitespace().map(str::to_string).collect())
        } else {
            AttrValue::Str(value.to_string())
        };
        self.attributes.insert(name, value);
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self
                .children
                .iter()
                .map(|child| child.text_content())
                .collect(),
        }
    }

    /// Reconstruct outer HTML, used for raw passthrough
    pub fn outer_html(&self) -> String {
        match self.node_type {
            NodeType::Text => escape_html_text(self.value.as_deref().unwrap_or("")),
            NodeType::Comment => format!("<!--{}-->", self.value.as_deref().unwrap_or("")),
            NodeType::Element => {
                let tag = self.tag_name();
                let attrs = self.attributes_string();
                let open = if attrs.is_empty() {
                    format!("<{}>", tag)
                } else {
                    format!("<{} {}>", tag, attrs)
                };

                if self.is_void_element() {
                    open
                } else {
                    format!("{}{}</{}>", open, self.inner_html(), tag)
                }
            }
            NodeType::Root => self.inner_html(),
        }
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        self.children.iter().map(|child| child.outer_html()).collect()
    }

    /// Get attributes as a string for HTML output
    fn attributes_string(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| {
                let value = value.to_markup();
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, escape_html_attr(&value))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if this is a void element
    fn is_void_element(&self) -> bool {
        crate::utilities::is_void(self.tag_name())
    }
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML text content
fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
