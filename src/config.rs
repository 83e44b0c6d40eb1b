//! Configuration
//!
//! Loaded from a TOML file in the platform config directory, or from the
//! path in `DATALENS_CONFIG`. A missing file means defaults everywhere.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::infra::import::reader::AcceptedExtensions;
use crate::infra::import::{DecodeOptions, DuplicateHeaders};
use crate::platform::desktop::paths::default_config_path;

pub const CONFIG_PATH_ENV: &str = "DATALENS_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Spreadsheet import settings
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    #[serde(default)]
    pub duplicate_headers: DuplicateHeaders,
}

fn default_extensions() -> Vec<String> {
    vec!["xlsx".to_string(), "xls".to_string()]
}

fn default_preview_rows() -> usize {
    5
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            preview_rows: default_preview_rows(),
            duplicate_headers: DuplicateHeaders::default(),
        }
    }
}

impl ImportConfig {
    pub fn accepted_extensions(&self) -> AcceptedExtensions {
        let defaults = AcceptedExtensions::spreadsheets();
        let configured = AcceptedExtensions::new("a spreadsheet", &self.extensions);
        if configured.extensions() == defaults.extensions() {
            defaults
        } else {
            configured
        }
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            duplicate_headers: self.duplicate_headers,
        }
    }

    pub fn preview_limit(&self) -> usize {
        self.preview_rows.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkMode {
    #[default]
    Simulated,
    Http,
}

/// Where imported rows and documents are sent
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub mode: SinkMode,

    #[serde(default = "default_rows_endpoint")]
    pub rows_endpoint: String,

    #[serde(default = "default_documents_endpoint")]
    pub documents_endpoint: String,

    #[serde(default = "default_simulated_delay")]
    pub simulated_delay_ms: u64,

    /// Unset means no timeout.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_rows_endpoint() -> String {
    "http://localhost:3000/api/import-excel".to_string()
}

fn default_documents_endpoint() -> String {
    "http://localhost:3000/api/upload-pdf".to_string()
}

fn default_simulated_delay() -> u64 {
    1000
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            mode: SinkMode::default(),
            rows_endpoint: default_rows_endpoint(),
            documents_endpoint: default_documents_endpoint(),
            simulated_delay_ms: default_simulated_delay(),
            request_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn resolve_path() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_config_path(),
        }
    }
}
