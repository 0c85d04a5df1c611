use serde::{Deserialize, Serialize};

/// Feature flags controlling optional server behavior.
///
/// Loaded from `config.toml` at server startup. Every field defaults to
/// `false` so that a missing or incomplete config file disables all
/// optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Seed the in-memory backend with sample gallery and sports rows.
    #[serde(default)]
    pub demo_content: bool,
}

pub const DEFAULT_GALLERY_LIMIT: usize = 12;
pub const DEFAULT_SPORTS_LIMIT: usize = 20;

/// How many of the most recent rows each listing page requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentLimits {
    #[serde(default = "default_gallery_limit")]
    pub gallery_limit: usize,
    #[serde(default = "default_sports_limit")]
    pub sports_limit: usize,
}

fn default_gallery_limit() -> usize {
    DEFAULT_GALLERY_LIMIT
}

fn default_sports_limit() -> usize {
    DEFAULT_SPORTS_LIMIT
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            gallery_limit: DEFAULT_GALLERY_LIMIT,
            sports_limit: DEFAULT_SPORTS_LIMIT,
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub content: ContentLimits,
}
