// SPDX-License-Identifier: AGPL-3.0-or-later
//! Richdoc Core - rich-text markup to structured office document conversion
//!
//! This crate provides:
//! - A markup tree model for WYSIWYG editor output (`markup`)
//! - A paragraph/run document model ready for container serialization (`ast`)
//! - The markup to document converter (`convert`)
//! - An HTML fragment parser and DOCX, JSON and plain text renderers

pub mod ast;
pub mod convert;
pub mod formats;
pub mod markup;
pub mod style;
pub mod traits;

pub use ast::{Alignment, Block, Document, Formatting, ListKind, Paragraph, Run, RunStyle};
pub use convert::convert;
#[cfg(feature = "html")]
pub use formats::html_to_document;
pub use markup::{Element, ElementKind, MarkupNode};
pub use traits::{
    ConversionError, OutputFormat, ParseConfig, Parser, ParserExt, RenderConfig, Renderer,
    RendererRegistry, Result,
};
