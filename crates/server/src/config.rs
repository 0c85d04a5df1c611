use shared_types::{AppConfig, ContentLimits, FeatureFlags};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Parse config file contents, falling back to defaults on any error.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "config parse failed; using defaults");
        AppConfig::default()
    })
}

/// Read `config.toml` once and cache it. Later calls are no-ops.
///
/// A missing or unparseable file leaves every flag off and the listing
/// limits at their defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_config(&contents);
            tracing::info!(features = ?config.features, content = ?config.content, "config loaded");
            config
        }
        Err(e) => {
            tracing::info!(path = CONFIG_PATH, error = %e, "config file not found; using defaults");
            AppConfig::default()
        }
    })
}

pub fn feature_flags() -> &'static FeatureFlags {
    &load_config().features
}

pub fn content_limits() -> &'static ContentLimits {
    &load_config().content
}
