// SPDX-License-Identifier: AGPL-3.0-or-later
//! Document operations behind the command line

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use richdoc_core::formats::HtmlParser;
use richdoc_core::{
    convert, Document, MarkupNode, OutputFormat, ParseConfig, Parser, ParserExt, RenderConfig,
    RendererRegistry,
};
use tracing::{debug, info};

/// Where converted output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

/// Outcome of one conversion
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub destination: Destination,
    pub format: OutputFormat,
    pub paragraphs: usize,
    pub word_count: usize,
    pub bytes: usize,
}

impl ConversionSummary {
    /// One-line report for stderr
    pub fn describe(&self) -> String {
        let target = match &self.destination {
            Destination::File(path) => path.display().to_string(),
            Destination::Stdout => "stdout".to_string(),
        };
        format!(
            "Created {} ({} paragraphs, {} words, {} {} bytes)",
            target,
            self.paragraphs,
            self.word_count,
            self.bytes,
            self.format.label(),
        )
    }
}

/// Parse HTML from a file, or stdin when the path is `-`
pub fn load_markup(path: &Path, config: &ParseConfig) -> Result<MarkupNode> {
    let parser = HtmlParser::new();
    if path == Path::new("-") {
        return parser
            .parse_reader(io::stdin().lock(), config)
            .context("failed to read HTML from stdin");
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = content.len(), "loaded input");
    Ok(parser.parse(&content, config)?)
}

/// Resolve the output destination: an explicit path wins, stdin input
/// goes to stdout, otherwise the input path with the target extension
pub fn resolve_destination(input: &Path, output: Option<&Path>, format: OutputFormat) -> Destination {
    match output {
        Some(path) if path == Path::new("-") => Destination::Stdout,
        Some(path) => Destination::File(path.to_path_buf()),
        None if input == Path::new("-") => Destination::Stdout,
        None => Destination::File(input.with_extension(format.extension())),
    }
}

fn render(
    root: &MarkupNode,
    format: OutputFormat,
    render_config: &RenderConfig,
) -> Result<(Document, Vec<u8>)> {
    let doc = convert(root);
    let bytes = RendererRegistry::with_defaults()
        .render(&doc, format, render_config)
        .with_context(|| format!("failed to render {}", format.label()))?;
    Ok((doc, bytes))
}

/// Run a full conversion from `input` to the resolved destination
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    parse_config: &ParseConfig,
    render_config: &RenderConfig,
) -> Result<ConversionSummary> {
    let root = load_markup(input, parse_config)?;
    let (doc, bytes) = render(&root, format, render_config)?;

    let destination = resolve_destination(input, output, format);
    match &destination {
        Destination::File(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "wrote output");
        }
        Destination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes).context("failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(ConversionSummary {
        destination,
        format,
        paragraphs: doc.blocks.len(),
        word_count: doc.word_count(),
        bytes: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_destination() {
        let input = Path::new("notes/letter.html");
        assert_eq!(
            resolve_destination(input, None, OutputFormat::Docx),
            Destination::File(PathBuf::from("notes/letter.docx"))
        );
        assert_eq!(
            resolve_destination(input, Some(Path::new("out.json")), OutputFormat::Json),
            Destination::File(PathBuf::from("out.json"))
        );
        assert_eq!(
            resolve_destination(Path::new("-"), None, OutputFormat::PlainText),
            Destination::Stdout
        );
        assert_eq!(
            resolve_destination(input, Some(Path::new("-")), OutputFormat::Docx),
            Destination::Stdout
        );
    }

    #[test]
    fn test_render_html_to_text() {
        let root = HtmlParser::new()
            .parse(
                "<h2>Notes</h2><ul><li>one</li><li>two</li></ul>",
                &ParseConfig::default(),
            )
            .unwrap();
        let (doc, bytes) = render(&root, OutputFormat::PlainText, &RenderConfig::default()).unwrap();
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(String::from_utf8(bytes).unwrap(), "## Notes\n\n- one\n- two");
    }

    #[test]
    fn test_convert_file_writes_docx() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("letter.html");
        fs::write(&input, "<p>Dear <b>reader</b>,</p><p>thanks</p>").unwrap();

        let summary = convert_file(
            &input,
            None,
            OutputFormat::Docx,
            &ParseConfig::default(),
            &RenderConfig::default(),
        )
        .unwrap();

        let expected = dir.path().join("letter.docx");
        assert_eq!(summary.destination, Destination::File(expected.clone()));
        assert_eq!(summary.paragraphs, 2);
        assert_eq!(summary.word_count, 3);
        let written = fs::read(&expected).unwrap();
        assert_eq!(written.len(), summary.bytes);
        assert_eq!(&written[..2], b"PK");
    }

    #[test]
    fn test_summary_describes_stdout() {
        let summary = ConversionSummary {
            destination: Destination::Stdout,
            format: OutputFormat::PlainText,
            paragraphs: 2,
            word_count: 5,
            bytes: 30,
        };
        assert_eq!(
            summary.describe(),
            "Created stdout (2 paragraphs, 5 words, 30 TXT bytes)"
        );
    }

    #[test]
    fn test_missing_input_is_reported() {
        let err = convert_file(
            Path::new("/definitely/not/here.html"),
            None,
            OutputFormat::Json,
            &ParseConfig::default(),
            &RenderConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
