//! Configuration types for gin.
//!
//! [`Config::load`] reads `~/.config/gin/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. Backend URLs can be
//! overridden with the `OPENGIN_*_API_URL` environment variables.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem or the environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[backend]
read_url      = "http://0.0.0.0:8081"
ingestion_url = "http://0.0.0.0:8080"

[search]
major_kinds = ["Person", "Organization", "Government", "Department", "Document"]

[extraction]
api_url          = "http://localhost:8000"
poll_interval_ms = 2000
"#;

/// Environment variable → config key.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("OPENGIN_READ_API_URL", "backend.read_url"),
    ("OPENGIN_INGESTION_API_URL", "backend.ingestion_url"),
    ("OPENGIN_EXTRACTION_API_URL", "extraction.api_url"),
];

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/gin/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// `[backend]` section: the two OpenGIN services.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Read API, serves entity search.
    #[serde(default = "default_read_url")]
    pub read_url: String,
    /// Ingestion API, serves create and update.
    #[serde(default = "default_ingestion_url")]
    pub ingestion_url: String,
}

fn default_read_url() -> String { "http://0.0.0.0:8081".to_string() }
fn default_ingestion_url() -> String { "http://0.0.0.0:8080".to_string() }

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            read_url: default_read_url(),
            ingestion_url: default_ingestion_url(),
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Major kinds queried when listing every entity, in request order.
    #[serde(default = "default_major_kinds")]
    pub major_kinds: Vec<String>,
}

fn default_major_kinds() -> Vec<String> {
    ["Person", "Organization", "Government", "Department", "Document"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            major_kinds: default_major_kinds(),
        }
    }
}

/// `[extraction]` section: the PDF extraction pipeline API.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_extraction_url")]
    pub api_url: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_extraction_url() -> String { "http://localhost:8000".to_string() }
fn default_poll_interval_ms() -> u64 { 2000 }

impl ExtractionConfig {
    /// Delay between result polls. Never zero; `0` means 1 ms.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_url: default_extraction_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/gin/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load a specific file over the defaults, then apply environment
    /// overrides. A missing file is not an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false));

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        builder.build()?.try_deserialize().map_err(Into::into)
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
        .join("gin")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
