//! Configuration types for dexter.
//!
//! [`Config::load`] reads `~/.config/dexter/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::types::SortKey;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[api]
base_url     = "https://pokeapi.co/api/v2"
limit        = 1025
concurrency  = 32
timeout_secs = 30

[search]
debounce_ms  = 200
default_sort = "alphabetic"

[ui]
show_description  = true
name_column_width = 14
theme             = "default"
"#;

/// Bounds on the query-bar quiescence window.
pub const DEBOUNCE_MIN_MS: u64 = 150;
pub const DEBOUNCE_MAX_MS: u64 = 250;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/dexter/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[api]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// How many records the list endpoint is asked for.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Maximum in-flight detail requests during a bulk load.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "https://pokeapi.co/api/v2".to_string() }
fn default_limit() -> usize { 1025 }
fn default_concurrency() -> usize { 32 }
fn default_timeout_secs() -> u64 { 30 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            limit: default_limit(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub default_sort: SortKey,
}

fn default_debounce_ms() -> u64 { 200 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_sort: SortKey::default(),
        }
    }
}

impl SearchConfig {
    /// The debounce window, clamped to 150–250 ms.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.clamp(DEBOUNCE_MIN_MS, DEBOUNCE_MAX_MS))
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_description")]
    pub show_description: bool,
    #[serde(default = "default_name_column_width")]
    pub name_column_width: u16,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_show_description() -> bool { true }
fn default_name_column_width() -> u16 { 14 }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_description: default_show_description(),
            name_column_width: default_name_column_width(),
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/dexter/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::from_file(&path)
    }

    /// Load `path` layered over the built-in defaults. A missing file yields
    /// the defaults.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("dexter")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.api.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(cfg.api.limit, 1025);
        assert_eq!(cfg.search.default_sort, SortKey::Alphabetic);
        assert_eq!(cfg.search.debounce(), Duration::from_millis(200));
        assert!(cfg.ui.show_description);
    }

    #[test]
    fn debounce_is_clamped() {
        let mut search = SearchConfig::default();
        search.debounce_ms = 10;
        assert_eq!(search.debounce(), Duration::from_millis(DEBOUNCE_MIN_MS));
        search.debounce_ms = 5_000;
        assert_eq!(search.debounce(), Duration::from_millis(DEBOUNCE_MAX_MS));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::from_file(std::path::Path::new("/nonexistent/dexter.toml")).unwrap();
        assert_eq!(cfg.api.concurrency, 32);
        assert_eq!(cfg.ui.name_column_width, 14);
    }
}
