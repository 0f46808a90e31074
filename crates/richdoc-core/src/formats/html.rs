// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTML fragment parser using scraper (html5ever tree builder)
//!
//! Editors export a body fragment (`<h1>..</h1><p>..</p>`), so input is
//! parsed in fragment mode. The resulting DOM is mapped onto the closed
//! `ElementKind` set; comments and doctypes are dropped.

use scraper::{ElementRef, Html};
use tracing::{debug, trace};

use crate::markup::{Element, ElementKind, MarkupNode};
use crate::traits::{ParseConfig, Parser, Result};

/// Elements whose content is never document text
const SKIPPED_TAGS: &[&str] = &["script", "style", "template", "head", "title"];

/// Element nesting kept as structure; deeper subtrees are reduced to text
const MAX_NESTING: usize = 256;

/// HTML fragment parser
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for HtmlParser {
    fn parse(&self, input: &str, config: &ParseConfig) -> Result<MarkupNode> {
        let fragment = Html::parse_fragment(input);
        if !fragment.errors.is_empty() {
            debug!(count = fragment.errors.len(), "html parser recovered from errors");
        }

        let root = fragment.root_element();
        let children = map_children(root, true, 0, config);
        debug!(bytes = input.len(), children = children.len(), "parsed html fragment");

        Ok(MarkupNode::Element(Element::new(
            ElementKind::Unrecognized("body".to_string()),
            children,
        )))
    }
}

fn map_children(
    parent: ElementRef<'_>,
    block_context: bool,
    depth: usize,
    config: &ParseConfig,
) -> Vec<MarkupNode> {
    let mut out = Vec::new();
    for child in parent.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if let Some(node) = map_element(child_el, depth + 1, config) {
                out.push(node);
            }
        } else if let Some(text) = child.value().as_text() {
            let content: &str = &text.text;
            if block_context && config.drop_blank_text && content.trim().is_empty() {
                continue;
            }
            out.push(MarkupNode::text(content));
        }
    }
    out
}

fn map_element(el: ElementRef<'_>, depth: usize, config: &ParseConfig) -> Option<MarkupNode> {
    let name = el.value().name();
    if SKIPPED_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)) {
        trace!(tag = name, "skipping non-content element");
        return None;
    }

    let kind = ElementKind::from_tag(name);
    if let ElementKind::Unrecognized(tag) = &kind {
        trace!(tag = %tag, "unrecognised tag kept as transparent container");
    }

    let children = if depth < MAX_NESTING {
        map_children(el, kind.is_block_container(), depth, config)
    } else {
        debug!(depth, tag = name, "nesting limit reached, keeping subtree text only");
        let content: String = el.text().collect();
        if content.is_empty() {
            Vec::new()
        } else {
            vec![MarkupNode::text(content)]
        }
    };

    let mut element = Element::new(kind, children);
    element.style = el.value().attr("style").map(str::to_string);
    element.href = el.value().attr("href").map(str::to_string);
    Some(MarkupNode::Element(element))
}

/// Parse an HTML fragment and convert it straight to a document
pub fn html_to_document(input: &str, config: &ParseConfig) -> Result<crate::ast::Document> {
    let root = HtmlParser::new().parse(input, config)?;
    Ok(crate::convert::convert(&root))
}
