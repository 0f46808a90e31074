// SPDX-License-Identifier: AGPL-3.0-or-later
//! Rich-text markup tree to structured document conversion
//!
//! Conversion is a single depth-first pass:
//! - block dispatch over the root's children emits one paragraph per
//!   heading, paragraph and list item (blockquotes are flattened, unknown
//!   elements with visible text become fallback paragraphs);
//! - run extraction walks each block's subtree, threading an immutable
//!   formatting context so siblings never see each other's flags.
//!
//! Conversion never fails. The result always holds at least one block.

use std::rc::Rc;

use crate::ast::{Block, Document, Flag, Formatting, ListKind, ListMembership, Paragraph, Run, RunStyle};
use crate::markup::{Element, ElementKind, MarkupNode};
use crate::style::{resolve_alignment, style_color};

/// Highest heading level a paragraph can carry
const MAX_HEADING_LEVEL: u8 = 6;

/// Formatting inherited from ancestors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RunContext {
    formatting: Formatting,
    color: Option<String>,
}

impl RunContext {
    fn with_flag(&self, flag: Flag) -> Self {
        Self {
            formatting: self.formatting.with(flag),
            color: self.color.clone(),
        }
    }

    fn with_color(&self, color: String) -> Self {
        Self {
            formatting: self.formatting,
            color: Some(color),
        }
    }

    fn run(&self, text: impl Into<String>) -> Run {
        Run {
            text: text.into(),
            formatting: self.formatting,
            color: self.color.clone(),
            ..Run::default()
        }
    }
}

/// Convert a markup tree into a document.
///
/// The root's direct children are dispatched as blocks; a root that is a
/// bare text leaf becomes a single paragraph when it holds visible text.
pub fn convert(root: &MarkupNode) -> Document {
    let mut blocks = Vec::new();
    match root {
        MarkupNode::Element(el) => dispatch_blocks(&el.children, &mut blocks),
        MarkupNode::Text { .. } => dispatch_blocks(std::slice::from_ref(root), &mut blocks),
    }

    if blocks.is_empty() {
        blocks.push(Block::Paragraph(Paragraph::default()));
    }

    Document::new(blocks)
}

/// Block dispatch over `nodes` in document order. Blockquote children are
/// spliced into the same work list, so quote depth costs no stack.
fn dispatch_blocks(nodes: &[MarkupNode], out: &mut Vec<Block>) {
    let mut pending: Vec<&MarkupNode> = nodes.iter().rev().collect();
    while let Some(node) = pending.pop() {
        let el = match node {
            MarkupNode::Text { content } => {
                if !content.trim().is_empty() {
                    out.push(Block::Paragraph(Paragraph {
                        runs: vec![Run::plain(content.clone())],
                        ..Paragraph::default()
                    }));
                }
                continue;
            }
            MarkupNode::Element(el) => el,
        };

        match &el.kind {
            ElementKind::Heading(level) => {
                out.push(block_paragraph(el, Some(heading_level(*level))));
            }
            ElementKind::Paragraph => out.push(block_paragraph(el, None)),
            ElementKind::UnorderedList => push_list_items(el, ListKind::Bullet, out),
            ElementKind::OrderedList => push_list_items(el, ListKind::Numbered, out),
            ElementKind::Blockquote => pending.extend(el.children.iter().rev()),
            _ => {
                if el.has_visible_text() {
                    out.push(block_paragraph(el, None));
                }
            }
        }
    }
}

/// Clamp a heading level into 1-6
fn heading_level(level: u8) -> u8 {
    level.clamp(1, MAX_HEADING_LEVEL)
}

fn block_paragraph(el: &Element, heading: Option<u8>) -> Block {
    Block::Paragraph(Paragraph {
        heading,
        alignment: resolve_alignment(el.style_text()),
        list: None,
        runs: extract_runs(&el.children),
    })
}

fn push_list_items(list: &Element, kind: ListKind, out: &mut Vec<Block>) {
    for child in &list.children {
        let MarkupNode::Element(item) = child else {
            continue;
        };
        if item.kind != ElementKind::ListItem {
            continue;
        }
        out.push(Block::Paragraph(Paragraph {
            heading: None,
            alignment: None,
            list: Some(ListMembership::top_level(kind)),
            runs: extract_runs(&item.children),
        }));
    }
}

/// Extract runs from a sequence of sibling nodes.
///
/// Depth-first over an explicit work list; every pending node carries the
/// context of its parent, shared between siblings and never mutated.
fn extract_runs(nodes: &[MarkupNode]) -> Vec<Run> {
    let root = Rc::new(RunContext::default());
    let mut pending: Vec<(&MarkupNode, Rc<RunContext>)> =
        nodes.iter().rev().map(|node| (node, Rc::clone(&root))).collect();
    let mut runs = Vec::new();

    while let Some((node, ctx)) = pending.pop() {
        let el = match node {
            MarkupNode::Text { content } => {
                if !content.is_empty() {
                    runs.push(ctx.run(content.clone()));
                }
                continue;
            }
            MarkupNode::Element(el) => el,
        };

        let child_ctx = match &el.kind {
            ElementKind::Bold => Rc::new(ctx.with_flag(Flag::Bold)),
            ElementKind::Italic => Rc::new(ctx.with_flag(Flag::Italic)),
            ElementKind::Underline => Rc::new(ctx.with_flag(Flag::Underline)),
            ElementKind::Subscript => Rc::new(ctx.with_flag(Flag::Subscript)),
            ElementKind::Superscript => Rc::new(ctx.with_flag(Flag::Superscript)),
            ElementKind::Span => match style_color(el.style_text()) {
                Some(color) => Rc::new(ctx.with_color(color)),
                None => ctx,
            },
            ElementKind::LineBreak => {
                runs.push(Run::line_break());
                continue;
            }
            ElementKind::Hyperlink => {
                let text = el.text_content();
                if !text.is_empty() {
                    runs.push(Run {
                        style: Some(RunStyle::Hyperlink),
                        link: el.href.clone(),
                        ..ctx.run(text)
                    });
                }
                continue;
            }
            _ => ctx,
        };

        pending.extend(el.children.iter().rev().map(|child| (child, Rc::clone(&child_ctx))));
    }
    runs
}
