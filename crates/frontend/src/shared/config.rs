//! Front-end configuration
//!
//! Defaults are embedded in the bundle. A TOML document stored under the
//! `app_config` localStorage key overrides them (handy for pointing a build at
//! another API port without rebuilding).

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::Deserialize;

const OVERRIDE_STORAGE_KEY: &str = "app_config";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
prefix = "/api"

[cache]
stale_time_secs = 60
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    pub stale_time_secs: i64,
}

fn default_prefix() -> String {
    "/api".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { stale_time_secs: 60 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                port: 3000,
                prefix: default_prefix(),
            },
            cache: CacheConfig::default(),
        }
    }
}

impl CacheConfig {
    pub fn stale_time(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.stale_time_secs.max(0))
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    toml::from_str(contents).context("Failed to parse configuration")
}

fn read_override() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(OVERRIDE_STORAGE_KEY)
        .ok()?
}

/// Load configuration
///
/// Search order:
/// 1. `app_config` in localStorage
/// 2. Embedded default config
pub fn load_config() -> anyhow::Result<AppConfig> {
    if let Some(contents) = read_override() {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Using configuration override from localStorage");
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring invalid configuration override: {:#}", e),
        }
    }

    parse_config(DEFAULT_CONFIG)
}

static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    load_config().unwrap_or_else(|e| {
        log::error!("{:#}; falling back to built-in defaults", e);
        AppConfig::default()
    })
});

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.cache.stale_time(), chrono::Duration::seconds(60));
    }

    #[test]
    fn test_cache_section_is_optional() {
        let config = parse_config("[api]\nport = 8080\n").unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.prefix, "/api");
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_negative_stale_time_is_zero() {
        let cache = CacheConfig { stale_time_secs: -5 };
        assert_eq!(cache.stale_time(), chrono::Duration::zero());
    }

    #[test]
    fn test_invalid_config() {
        assert!(parse_config("[api]\nport = \"x\"").is_err());
    }
}
