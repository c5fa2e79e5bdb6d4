//! Site configuration.
//!
//! Loaded from `site.toml`, embedded at build time. A broken file never blocks
//! the page: callers fall back to defaults and log the parse error.

use reveal_core::RevealConfig;
use serde::Deserialize;
use tracing::Level;

const EMBEDDED: &str = include_str!("../site.toml");

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Defaults for every `<Reveal>` wrapper on the page
    pub reveal: RevealConfig,
    pub log: LogConfig,
    pub cta: CtaConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    /// Parsed level; unknown names fall back to INFO.
    pub fn max_level(&self) -> Level {
        self.level.trim().parse().unwrap_or(Level::INFO)
    }
}

/// Labels and targets of the hero call-to-action pair
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CtaConfig {
    pub primary_label: String,
    pub primary_href: String,
    pub secondary_label: String,
    pub secondary_href: String,
}

impl Default for CtaConfig {
    fn default() -> Self {
        Self {
            primary_label: "Get Started".to_string(),
            primary_href: "#platforms".to_string(),
            secondary_label: "How it works".to_string(),
            secondary_href: "#how-it-works".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse the embedded `site.toml`.
    pub fn embedded() -> Result<Self, toml::de::Error> {
        Self::from_toml_str(EMBEDDED)
    }
}
