// SPDX-License-Identifier: AGPL-3.0-or-later
//! Markup parsers and document renderers

#[cfg(feature = "html")]
pub mod html;
pub mod json;
pub mod plaintext;
#[cfg(feature = "docx")]
pub mod docx;

#[cfg(feature = "html")]
pub use html::{html_to_document, HtmlParser};
pub use json::JsonRenderer;
pub use plaintext::PlainTextRenderer;
#[cfg(feature = "docx")]
pub use docx::DocxRenderer;
