// SPDX-License-Identifier: AGPL-3.0-or-later
//! Rich-text markup tree (the input side of conversion)
//!
//! A `MarkupNode` tree is what a WYSIWYG editor's HTML export looks like once
//! parsed: text leaves and elements with a small, closed set of recognised
//! tags. Anything the converter does not understand is kept as
//! `ElementKind::Unrecognized` so its children are still reachable.

use serde::{Deserialize, Serialize};

/// One node of the parsed rich-text tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkupNode {
    /// Literal text leaf
    Text { content: String },
    /// Element with children
    Element(Element),
}

impl MarkupNode {
    /// Create a text leaf
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text {
            content: content.into(),
        }
    }

    /// Create an element node without attributes
    pub fn element(kind: ElementKind, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Element(Element::new(kind, children))
    }

    /// Concatenated text of this node and all descendants, in document order
    pub fn text_content(&self) -> String {
        self.texts().collect()
    }

    /// True when the subtree holds at least one non-whitespace character
    pub fn has_visible_text(&self) -> bool {
        self.texts().any(|t| !t.trim().is_empty())
    }

    /// Text leaves of this subtree in document order
    pub fn texts(&self) -> Texts<'_> {
        Texts {
            pending: vec![self],
        }
    }
}

/// Depth-first iterator over the text leaves of a subtree
pub struct Texts<'a> {
    pending: Vec<&'a MarkupNode>,
}

impl<'a> Iterator for Texts<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.pending.pop() {
            match node {
                MarkupNode::Text { content } => return Some(content.as_str()),
                MarkupNode::Element(el) => self.pending.extend(el.children.iter().rev()),
            }
        }
        None
    }
}

impl From<Element> for MarkupNode {
    fn from(el: Element) -> Self {
        MarkupNode::Element(el)
    }
}

/// An element with its tag identity, attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    /// Raw `style` attribute text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Link target (only meaningful on hyperlinks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(kind: ElementKind, children: Vec<MarkupNode>) -> Self {
        Self {
            kind,
            style: None,
            href: None,
            children,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Style attribute text, empty when absent
    pub fn style_text(&self) -> &str {
        self.style.as_deref().unwrap_or("")
    }

    pub fn text_content(&self) -> String {
        self.texts().collect()
    }

    pub fn has_visible_text(&self) -> bool {
        self.texts().any(|t| !t.trim().is_empty())
    }

    /// Text leaves of the children in document order
    pub fn texts(&self) -> Texts<'_> {
        Texts {
            pending: self.children.iter().rev().collect(),
        }
    }
}

// Editor exports can nest arbitrarily deep; unlink children iteratively so
// dropping a tree never recurses once per level.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let MarkupNode::Element(mut el) = node {
                pending.append(&mut el.children);
            }
        }
    }
}

/// Tag identity of an element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Heading with level 1-6
    Heading(u8),
    Paragraph,
    Bold,
    Italic,
    Underline,
    Subscript,
    Superscript,
    /// Styled inline span (carries colour declarations)
    Span,
    LineBreak,
    Hyperlink,
    UnorderedList,
    OrderedList,
    ListItem,
    Blockquote,
    /// Any other tag; the name is kept for diagnostics only
    Unrecognized(String),
}

impl ElementKind {
    /// Map an HTML tag name (case-insensitive) to its element kind
    pub fn from_tag(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "b" | "strong" => Self::Bold,
            "i" | "em" => Self::Italic,
            "u" => Self::Underline,
            "sub" => Self::Subscript,
            "sup" => Self::Superscript,
            "span" => Self::Span,
            "br" => Self::LineBreak,
            "a" => Self::Hyperlink,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            _ => Self::Unrecognized(lower),
        }
    }

    /// Container kinds whose direct text children are layout whitespace
    pub const fn is_block_container(&self) -> bool {
        matches!(
            self,
            Self::UnorderedList | Self::OrderedList | Self::Blockquote
        )
    }
}
