// SPDX-License-Identifier: AGPL-3.0-or-later
//! `richdoc` - convert rich-text editor HTML exports to DOCX

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use richdoc_core::OutputFormat;
use tracing_subscriber::EnvFilter;

use crate::commands::convert_file;
use crate::config::FileConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Target {
    Docx,
    Json,
    Text,
}

impl From<Target> for OutputFormat {
    fn from(t: Target) -> Self {
        match t {
            Target::Docx => OutputFormat::Docx,
            Target::Json => OutputFormat::Json,
            Target::Text => OutputFormat::PlainText,
        }
    }
}

#[derive(Parser)]
#[command(name = "richdoc")]
#[command(about = "Convert rich-text HTML to DOCX, JSON or plain text")]
struct Cli {
    /// Input HTML file (`-` for stdin)
    input: PathBuf,

    /// Output file (defaults to the input name with the target extension, `-` for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "docx")]
    to: Target,

    /// TOML file with [parse] and [render] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Body font family (overrides the config file)
    #[arg(long)]
    font: Option<String>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Default filter for a `-v` count; `RUST_LOG` overrides it
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    if let Some(font) = cli.font {
        file_config.render.font_family = Some(font);
    }

    let summary = convert_file(
        &cli.input,
        cli.output.as_deref(),
        cli.to.into(),
        &file_config.parse,
        &file_config.render,
    )?;

    eprintln!("{}", summary.describe());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filters() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "debug");
        assert_eq!(default_filter(5), "trace");
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["richdoc", "in.html", "-t", "text", "-o", "-", "-v"]).unwrap();
        assert!(matches!(OutputFormat::from(cli.to), OutputFormat::PlainText));
        assert_eq!(cli.output.as_deref(), Some(std::path::Path::new("-")));
        assert_eq!(cli.verbose, 1);
    }
}
