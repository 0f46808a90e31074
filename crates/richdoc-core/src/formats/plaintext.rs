// SPDX-License-Identifier: AGPL-3.0-or-later
//! Plain text renderer

use crate::ast::{Document, ListKind, Paragraph};
use crate::traits::{OutputFormat, RenderConfig, Renderer, Result};

/// Plain text renderer (previews and diffs)
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::PlainText
    }

    fn render(&self, doc: &Document, _config: &RenderConfig) -> Result<Vec<u8>> {
        Ok(render_text(doc).into_bytes())
    }
}

/// Render a document as plain text, one blank line between paragraphs
/// and none between consecutive items of the same list
pub fn render_text(doc: &Document) -> String {
    let mut output = String::new();
    let mut prev_list: Option<ListKind> = None;
    let mut number = 0usize;

    for (i, paragraph) in doc.paragraphs().enumerate() {
        let list = paragraph.list.map(|l| l.kind);
        if i > 0 {
            if list.is_some() && list == prev_list {
                output.push('\n');
            } else {
                output.push_str("\n\n");
            }
        }

        number = match list {
            Some(ListKind::Numbered) if prev_list == Some(ListKind::Numbered) => number + 1,
            Some(ListKind::Numbered) => 1,
            _ => 0,
        };

        render_paragraph(&mut output, paragraph, number);
        prev_list = list;
    }

    output
}

fn render_paragraph(output: &mut String, paragraph: &Paragraph, number: usize) {
    if let Some(level) = paragraph.heading {
        output.push_str(&"#".repeat(level as usize));
        output.push(' ');
    }
    match paragraph.list.map(|l| l.kind) {
        Some(ListKind::Bullet) => output.push_str("- "),
        Some(ListKind::Numbered) => output.push_str(&format!("{number}. ")),
        None => {}
    }
    output.push_str(&paragraph.plain_text());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, ListMembership, Run};

    fn para(text: &str, list: Option<ListKind>, heading: Option<u8>) -> Block {
        Block::Paragraph(Paragraph {
            heading,
            list: list.map(ListMembership::top_level),
            runs: vec![Run::plain(text)],
            ..Paragraph::default()
        })
    }

    #[test]
    fn test_render_headings_and_lists() {
        let doc = Document::new(vec![
            para("Title", None, Some(2)),
            para("a", Some(ListKind::Numbered), None),
            para("b", Some(ListKind::Numbered), None),
            para("c", Some(ListKind::Bullet), None),
            para("d", Some(ListKind::Numbered), None),
        ]);
        assert_eq!(render_text(&doc), "## Title\n\n1. a\n2. b\n\n- c\n\n1. d");
    }

    #[test]
    fn test_render_breaks() {
        let doc = Document::new(vec![Block::Paragraph(Paragraph {
            runs: vec![Run::plain("A"), Run::line_break(), Run::plain("B")],
            ..Paragraph::default()
        })]);
        let bytes = PlainTextRenderer::new()
            .render(&doc, &RenderConfig::default())
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "A\nB");
    }
}
