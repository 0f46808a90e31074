// SPDX-License-Identifier: AGPL-3.0-or-later
//! JSON dump of the document model

use crate::ast::Document;
use crate::traits::{ConversionError, OutputFormat, RenderConfig, Renderer, Result};

/// Serializes the document model as JSON
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<Vec<u8>> {
        let out = if config.pretty {
            serde_json::to_vec_pretty(doc)
        } else {
            serde_json::to_vec(doc)
        };
        out.map_err(|e| ConversionError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, Paragraph, Run};

    #[test]
    fn test_json_roundtrip() {
        let doc = Document::new(vec![Block::Paragraph(Paragraph {
            heading: Some(1),
            runs: vec![Run::plain("x")],
            ..Paragraph::default()
        })]);
        let config = RenderConfig {
            pretty: false,
            ..RenderConfig::default()
        };
        let bytes = JsonRenderer.render(&doc, &config).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(!text.contains('\n'));
        let back: Document = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, doc);
    }
}
