use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the chart goes when nothing else is requested.
pub const DEFAULT_OUTPUT: &str = "ERG graph.png";

/// Chart settings, read from an optional TOML file.
///
/// ```toml
/// width = 1200
/// height = 700
/// title = "Subject 3"
/// output = "plots/erp.png"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl RenderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: RenderConfig = toml::from_str(text)?;
        if cfg.width == 0 || cfg.height == 0 {
            anyhow::bail!("chart size must be non-zero, got {}x{}", cfg.width, cfg.height);
        }
        Ok(cfg)
    }
}
