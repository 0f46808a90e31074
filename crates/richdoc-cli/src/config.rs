// SPDX-License-Identifier: AGPL-3.0-or-later
//! TOML configuration file for the command-line front end

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use richdoc_core::{ParseConfig, RenderConfig};
use serde::Deserialize;

/// Contents of a `--config` file; every table and key is optional
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub parse: ParseConfig,
    pub render: RenderConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = FileConfig::from_toml(
            r##"
            [render]
            font_family = "Georgia"
            hyperlink_color = "#1f4e79"
            "##,
        )
        .unwrap();
        assert_eq!(config.render.font_family.as_deref(), Some("Georgia"));
        assert_eq!(config.render.hyperlink_color, "#1f4e79");
        assert_eq!(config.render.font_size, 22);
        assert!(config.parse.drop_blank_text);
    }

    #[test]
    fn test_empty_config() {
        let config = FileConfig::from_toml("").unwrap();
        assert!(config.render.font_family.is_none());
    }

    #[test]
    fn test_load_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("richdoc.toml");
        fs::write(&path, "[render\nfont_size = 'x'").unwrap();
        let err = FileConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
