// SPDX-License-Identifier: AGPL-3.0-or-later
//! DOCX renderer using docx-rs
//!
//! Maps the document model onto WordprocessingML: heading paragraphs use the
//! built-in `Heading1`..`Heading6` style ids, list paragraphs reference a
//! bullet or decimal numbering at level 0, and hyperlink runs use a
//! `Hyperlink` character style, wrapped in an external hyperlink when the
//! run carries a target.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, Hyperlink, HyperlinkType, IndentLevel,
    Level, LevelJc, LevelText, NumberFormat, Numbering, NumberingId, Paragraph as DocxParagraph,
    Run as DocxRun, RunFonts, SpecialIndentType, Start, Style, StyleType, VertAlignType,
};
use tracing::debug;

use crate::ast::{Alignment, Document, ListKind, Paragraph, Run};
use crate::traits::{ConversionError, OutputFormat, RenderConfig, Renderer, Result};

/// Numbering id shared by every bulleted paragraph
const BULLET_NUMBERING_ID: usize = 1;

/// Heading style ids and sizes in half-points
const HEADING_STYLES: [(&str, &str, usize); 6] = [
    ("Heading1", "Heading 1", 32),
    ("Heading2", "Heading 2", 28),
    ("Heading3", "Heading 3", 26),
    ("Heading4", "Heading 4", 24),
    ("Heading5", "Heading 5", 22),
    ("Heading6", "Heading 6", 20),
];

/// DOCX renderer
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DocxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<Vec<u8>> {
        let mut config = config.clone();
        config.validate()?;

        let mut docx = add_styles(Docx::new(), &config);
        docx = add_bullet_numbering(docx);

        let mut numbering = NumberedLists::new(BULLET_NUMBERING_ID + 1);
        let mut prev_kind: Option<ListKind> = None;
        for paragraph in doc.paragraphs() {
            let kind = paragraph.list.map(|l| l.kind);
            let numbering_id = match kind {
                Some(ListKind::Bullet) => Some(BULLET_NUMBERING_ID),
                Some(ListKind::Numbered) => {
                    if prev_kind != Some(ListKind::Numbered) {
                        docx = numbering.start_list(docx);
                    }
                    Some(numbering.current)
                }
                None => None,
            };
            docx = docx.add_paragraph(build_paragraph(paragraph, numbering_id, &config));
            prev_kind = kind;
        }

        let mut buffer = Vec::new();
        docx.build()
            .pack(&mut Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::PackageError(e.to_string()))?;

        debug!(
            paragraphs = doc.blocks.len(),
            numbered_lists = numbering.count(),
            bytes = buffer.len(),
            "rendered docx"
        );
        Ok(buffer)
    }
}

/// Allocates one numbering instance per contiguous numbered list so each
/// list restarts at 1
struct NumberedLists {
    first: usize,
    current: usize,
}

impl NumberedLists {
    fn new(first: usize) -> Self {
        Self {
            first,
            current: first - 1,
        }
    }

    fn start_list(&mut self, docx: Docx) -> Docx {
        self.current += 1;
        let level = list_level(NumberFormat::new("decimal"), LevelText::new("%1."), 420);
        docx.add_abstract_numbering(AbstractNumbering::new(self.current).add_level(level))
            .add_numbering(Numbering::new(self.current, self.current))
    }

    fn count(&self) -> usize {
        self.current + 1 - self.first
    }
}

fn list_level(format: NumberFormat, text: LevelText, hanging: i32) -> Level {
    Level::new(0, Start::new(1), format, text, LevelJc::new("left")).indent(
        Some(720),
        Some(SpecialIndentType::Hanging(hanging)),
        None,
        None,
    )
}

fn add_bullet_numbering(docx: Docx) -> Docx {
    let level = list_level(NumberFormat::new("bullet"), LevelText::new("•"), 360);
    docx.add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(level))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
}

fn add_styles(mut docx: Docx, config: &RenderConfig) -> Docx {
    for (id, name, size) in HEADING_STYLES {
        docx = docx.add_style(
            Style::new(id, StyleType::Paragraph)
                .name(name)
                .size(size)
                .bold(),
        );
    }
    docx.add_style(
        Style::new("Hyperlink", StyleType::Character)
            .name("Hyperlink")
            .color(&config.hyperlink_color)
            .underline("single"),
    )
}

/// Style id for a heading level; levels outside 1-6 are clamped
pub fn heading_style_id(level: u8) -> &'static str {
    let index = level.clamp(1, 6) as usize - 1;
    HEADING_STYLES[index].0
}

/// DOCX alignment for a paragraph alignment
pub fn alignment_type(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Start => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::End => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Justified,
    }
}

fn build_paragraph(paragraph: &Paragraph, numbering_id: Option<usize>, config: &RenderConfig) -> DocxParagraph {
    let mut para = DocxParagraph::new();

    if let Some(level) = paragraph.heading {
        para = para.style(heading_style_id(level));
    }
    if let Some(alignment) = paragraph.alignment {
        para = para.align(alignment_type(alignment));
    }
    if let (Some(id), Some(list)) = (numbering_id, paragraph.list) {
        para = para.numbering(NumberingId::new(id), IndentLevel::new(list.level as usize));
    }

    for run in &paragraph.runs {
        let docx_run = build_run(run, paragraph.heading.is_some(), config);
        para = match &run.link {
            Some(target) if run.is_hyperlink() => para.add_hyperlink(
                Hyperlink::new(target, HyperlinkType::External).add_run(docx_run),
            ),
            _ => para.add_run(docx_run),
        };
    }
    para
}

fn build_run(run: &Run, in_heading: bool, config: &RenderConfig) -> DocxRun {
    if run.line_break {
        return DocxRun::new().add_break(BreakType::TextWrapping);
    }

    let mut out = DocxRun::new().add_text(&run.text);

    // Heading styles carry their own size
    if !in_heading {
        out = out.size(config.font_size);
    }
    if let Some(family) = &config.font_family {
        out = out.fonts(
            RunFonts::new()
                .ascii(family)
                .hi_ansi(family)
                .east_asia(family)
                .cs(family),
        );
    }

    let f = run.formatting;
    if f.bold {
        out = out.bold();
    }
    if f.italic {
        out = out.italic();
    }
    if f.underline {
        out = out.underline("single");
    }
    if f.superscript {
        out.run_property = out.run_property.vert_align(VertAlignType::SuperScript);
    } else if f.subscript {
        out.run_property = out.run_property.vert_align(VertAlignType::SubScript);
    }
    if run.is_hyperlink() {
        out = out.style("Hyperlink");
    }
    if let Some(color) = &run.color {
        out = out.color(color);
    }
    out
}
