use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cdn::CdnRewriter;

/// Complete render.yaml structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub cdn: CdnConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// CDN substitution for embedded resources
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CdnConfig {
    /// CDN base URL, e.g. `https://cdn.example.com` (rewriting is off when unset)
    #[serde(default)]
    pub url: Option<String>,
    /// Hosts whose resources are served from the CDN instead
    #[serde(default)]
    pub legacy_hosts: Vec<String>,
}

impl CdnConfig {
    pub fn rewriter(&self) -> CdnRewriter {
        CdnRewriter::new(self.url.clone(), self.legacy_hosts.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Language assumed for code blocks without a `language-*` class
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of rendered documents kept in memory
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Element nesting beyond this depth aborts enrichment
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_language() -> String {
    "plaintext".to_string()
}

fn default_cache_capacity() -> usize {
    64
}

pub(crate) fn default_max_depth() -> usize {
    256
}

pub fn load_config(path: &Path) -> Result<RenderConfig> {
    if !path.exists() {
        return Ok(RenderConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
