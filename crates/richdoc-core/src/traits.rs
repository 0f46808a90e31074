// SPDX-License-Identifier: AGPL-3.0-or-later
//! Parser and Renderer traits, configuration and errors

use crate::ast::Document;
use crate::markup::MarkupNode;
use crate::style::parse_color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Error type for parsing and rendering
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Packaging error: {0}")]
    PackageError(String),

    #[error("Unsupported output format: {format:?}")]
    UnsupportedFormat { format: OutputFormat },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

/// Output format identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Docx,
    Json,
    PlainText,
}

impl OutputFormat {
    /// File extension for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Json => "json",
            Self::PlainText => "txt",
        }
    }

    /// Short display name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Docx => "DOCX",
            Self::Json => "JSON",
            Self::PlainText => "TXT",
        }
    }

    pub const ALL: [Self; 3] = [Self::Docx, Self::Json, Self::PlainText];
}

/// Configuration for parsing markup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Drop whitespace-only text sitting directly under the root, lists and
    /// blockquotes (source indentation between block elements)
    pub drop_blank_text: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            drop_blank_text: true,
        }
    }
}

/// Configuration for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default font family for body text (container default when unset)
    pub font_family: Option<String>,
    /// Default font size in half-points (22 = 11pt)
    pub font_size: usize,
    /// Colour of the hyperlink character style, any accepted CSS colour form
    pub hyperlink_color: String,
    /// Pretty-print structured output
    pub pretty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 22,
            hyperlink_color: "0563c1".to_string(),
            pretty: true,
        }
    }
}

impl RenderConfig {
    /// Check values and normalise the hyperlink colour to six hex digits
    pub fn validate(&mut self) -> Result<()> {
        if self.font_size == 0 || self.font_size > 3276 {
            return Err(ConversionError::InvalidConfig(format!(
                "font_size must be between 1 and 3276 half-points, got {}",
                self.font_size
            )));
        }

        let raw = self.hyperlink_color.trim().to_string();
        let normalized = if raw.len() == 6 && !raw.starts_with('#') {
            parse_color(&format!("#{raw}"))
        } else {
            parse_color(&raw)
        };
        self.hyperlink_color = normalized.ok_or_else(|| {
            ConversionError::InvalidConfig(format!(
                "hyperlink_color is not a recognised colour: {raw:?}"
            ))
        })?;
        Ok(())
    }
}

/// Parser trait: convert serialized markup to a markup tree
pub trait Parser: Send + Sync {
    /// Parse a string into a markup tree
    fn parse(&self, input: &str, config: &ParseConfig) -> Result<MarkupNode>;
}

/// Renderer trait: convert a document to a target format
pub trait Renderer: Send + Sync {
    /// The target format this renderer produces
    fn format(&self) -> OutputFormat;

    /// Render a Document to bytes
    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<Vec<u8>>;
}

/// Extension trait for streaming operations (not dyn-compatible)
pub trait ParserExt: Parser {
    /// Parse from a reader
    fn parse_reader<R: Read>(&self, reader: R, config: &ParseConfig) -> Result<MarkupNode> {
        let mut input = String::new();
        let mut reader = reader;
        reader.read_to_string(&mut input)?;
        self.parse(&input, config)
    }
}

// Blanket implementation
impl<T: Parser> ParserExt for T {}

/// Registry of renderers keyed by output format
pub struct RendererRegistry {
    renderers: HashMap<OutputFormat, Box<dyn Renderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registry holding every renderer compiled into this build
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::formats::JsonRenderer));
        registry.register(Box::new(crate::formats::PlainTextRenderer));
        #[cfg(feature = "docx")]
        registry.register(Box::new(crate::formats::DocxRenderer));
        registry
    }

    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.insert(renderer.format(), renderer);
    }

    pub fn get(&self, format: OutputFormat) -> Option<&dyn Renderer> {
        self.renderers.get(&format).map(|r| r.as_ref())
    }

    /// Render with the renderer registered for `format`
    pub fn render(
        &self,
        doc: &Document,
        format: OutputFormat,
        config: &RenderConfig,
    ) -> Result<Vec<u8>> {
        let renderer = self
            .get(format)
            .ok_or(ConversionError::UnsupportedFormat { format })?;
        renderer.render(doc, config)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_normalises_hyperlink_color() {
        let mut config = RenderConfig {
            hyperlink_color: "#abc".to_string(),
            ..RenderConfig::default()
        };
        config.validate().unwrap();
        assert_eq!(config.hyperlink_color, "aabbcc");

        let mut bare = RenderConfig {
            hyperlink_color: "1F4E79".to_string(),
            ..RenderConfig::default()
        };
        bare.validate().unwrap();
        assert_eq!(bare.hyperlink_color, "1F4E79");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RenderConfig {
            hyperlink_color: "blue".to_string(),
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConversionError::InvalidConfig(_))
        ));

        let mut config = RenderConfig {
            font_size: 0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_render_config_deserializes_partial() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"font_family": "Georgia"}"#).unwrap();
        assert_eq!(config.font_family.as_deref(), Some("Georgia"));
        assert_eq!(config.font_size, 22);
        assert!(ParseConfig::default().drop_blank_text);
    }

    #[test]
    fn test_registry_reports_missing_renderer() {
        let registry = RendererRegistry::new();
        let err = registry
            .render(&Document::default(), OutputFormat::Json, &RenderConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedFormat {
                format: OutputFormat::Json
            }
        ));
    }

    #[test]
    fn test_output_format_extensions() {
        for format in OutputFormat::ALL {
            assert!(!format.extension().is_empty());
            assert_eq!(format.extension(), format.extension().to_lowercase());
        }
    }
}
