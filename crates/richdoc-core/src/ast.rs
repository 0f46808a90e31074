// SPDX-License-Identifier: AGPL-3.0-or-later
//! Structured document model (the output side of conversion)
//!
//! A `Document` is an ordered list of paragraph blocks, each made of runs of
//! uniformly formatted text. It carries exactly the attributes a document
//! container serializer has to honour: heading level, alignment, list
//! membership and per-run formatting flags and colour.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// The root document node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new document from its blocks
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Iterate over the paragraphs in order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().map(|block| match block {
            Block::Paragraph(p) => p,
        })
    }

    /// Count words in the document
    pub fn word_count(&self) -> usize {
        self.paragraphs().map(Paragraph::word_count).sum()
    }

    /// Count characters in the document
    pub fn char_count(&self) -> usize {
        self.paragraphs().map(Paragraph::char_count).sum()
    }
}

/// Block-level elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

/// A paragraph: body text, heading or list item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Heading level 1-6, `None` for body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListMembership>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Text of all runs, with break runs rendered as newlines
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            if run.line_break {
                out.push('\n');
            } else {
                out.push_str(&run.text);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.plain_text().unicode_words().count()
    }

    pub fn char_count(&self) -> usize {
        self.runs.iter().map(|r| r.text.chars().count()).sum()
    }
}

/// Paragraph alignment. Start is the implicit default and is never produced
/// by style resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    Center,
    End,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet,
    Numbered,
}

/// List membership of a paragraph that came from a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMembership {
    pub kind: ListKind,
    /// Nesting level, always 0 for now
    pub level: u8,
}

impl ListMembership {
    pub const fn top_level(kind: ListKind) -> Self {
        Self { kind, level: 0 }
    }
}

/// Character style tag attached to a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStyle {
    Hyperlink,
}

/// Run-level formatting flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formatting {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub subscript: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub superscript: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A single formatting flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Bold,
    Italic,
    Underline,
    Subscript,
    Superscript,
}

impl Formatting {
    /// Copy of these flags with `flag` added
    #[must_use]
    pub fn with(self, flag: Flag) -> Self {
        let mut next = self;
        match flag {
            Flag::Bold => next.bold = true,
            Flag::Italic => next.italic = true,
            Flag::Underline => next.underline = true,
            Flag::Subscript => next.subscript = true,
            Flag::Superscript => next.superscript = true,
        }
        next
    }

    pub const fn contains(&self, flag: Flag) -> bool {
        match flag {
            Flag::Bold => self.bold,
            Flag::Italic => self.italic,
            Flag::Underline => self.underline,
            Flag::Subscript => self.subscript,
            Flag::Superscript => self.superscript,
        }
    }

    pub const fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline || self.subscript || self.superscript)
    }
}

/// A span of text sharing identical formatting, or a line-break marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub formatting: Formatting,
    /// Six hex digits, no leading `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<RunStyle>,
    /// Link target of a hyperlink run, when the source element had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Explicit break marker; `text` is empty when set
    #[serde(default, skip_serializing_if = "is_false")]
    pub line_break: bool,
}

impl Run {
    /// Plain, unformatted text run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A single line-break marker
    pub fn line_break() -> Self {
        Self {
            line_break: true,
            ..Self::default()
        }
    }

    pub fn is_hyperlink(&self) -> bool {
        self.style == Some(RunStyle::Hyperlink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_default_is_empty() {
        let doc = Document::default();
        assert!(doc.blocks.is_empty());
        assert_eq!(doc.word_count(), 0);
    }

    #[test]
    fn test_word_count() {
        let doc = Document::new(vec![Block::Paragraph(Paragraph {
            runs: vec![
                Run::plain("Hello world"),
                Run::line_break(),
                Run::plain("this is a test"),
            ],
            ..Paragraph::default()
        })]);
        assert_eq!(doc.word_count(), 6);
        assert_eq!(doc.char_count(), 25);
    }

    #[test]
    fn test_formatting_with_does_not_mutate() {
        let base = Formatting::default().with(Flag::Bold);
        let extended = base.with(Flag::Italic);
        assert!(base.bold && !base.italic);
        assert!(extended.bold && extended.italic);
    }

    #[test]
    fn test_paragraph_serializes_compactly() {
        let block = Block::Paragraph(Paragraph {
            heading: Some(2),
            runs: vec![Run::plain("Title")],
            ..Paragraph::default()
        });
        let json = serde_json::to_value(&block).expect("serialize");
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["heading"], 2);
        assert!(json.get("alignment").is_none());
        assert!(json["runs"][0].get("line_break").is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn flag_strategy() -> impl Strategy<Value = Flag> {
        prop_oneof![
            Just(Flag::Bold),
            Just(Flag::Italic),
            Just(Flag::Underline),
            Just(Flag::Subscript),
            Just(Flag::Superscript),
        ]
    }

    fn run_strategy() -> impl Strategy<Value = Run> {
        prop_oneof![
            "[a-zA-Z0-9 ]{1,40}".prop_map(Run::plain),
            Just(Run::line_break()),
        ]
    }

    fn paragraph_strategy() -> impl Strategy<Value = Paragraph> {
        (
            proptest::option::of(1u8..=6),
            prop::collection::vec(run_strategy(), 0..6),
        )
            .prop_map(|(heading, runs)| Paragraph {
                heading,
                runs,
                ..Paragraph::default()
            })
    }

    proptest! {
        // Adding flags only ever extends the set
        #[test]
        fn prop_with_is_monotonic(flags in prop::collection::vec(flag_strategy(), 0..8), probe in flag_strategy()) {
            let mut acc = Formatting::default();
            for f in &flags {
                let next = acc.with(*f);
                prop_assert!(next.contains(*f));
                if acc.contains(probe) {
                    prop_assert!(next.contains(probe));
                }
                acc = next;
            }
            prop_assert_eq!(acc.is_plain(), flags.is_empty());
        }

        #[test]
        fn prop_document_serde_roundtrip(paras in prop::collection::vec(paragraph_strategy(), 0..8)) {
            let doc = Document::new(paras.into_iter().map(Block::from).collect());
            let json = serde_json::to_string(&doc).expect("serialize");
            let back: Document = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(doc, back);
        }

        #[test]
        fn prop_char_count_ignores_breaks(paragraph in paragraph_strategy()) {
            let expected: usize = paragraph
                .runs
                .iter()
                .filter(|r| !r.line_break)
                .map(|r| r.text.chars().count())
                .sum();
            prop_assert_eq!(paragraph.char_count(), expected);
        }
    }
}
