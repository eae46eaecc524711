//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.pagegrab.toml` files.

use crate::backend::HttpBackendConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".pagegrab.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Download settings.
    #[serde(default)]
    pub download: DownloadConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Analysis backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend.
    #[serde(default = "default_base_url")]
    pub url: String,

    /// Path of the analyze endpoint.
    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,

    /// Path of the download endpoint.
    #[serde(default = "default_download_path")]
    pub download_path: String,

    /// Request timeout in seconds. Unset means wait until the request settles.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_base_url(),
            analyze_path: default_analyze_path(),
            download_path: default_download_path(),
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_analyze_path() -> String {
    "/analyze".to_string()
}

fn default_download_path() -> String {
    "/download".to_string()
}

/// Settings for files the backend returns as attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory attachments are written to.
    #[serde(default = "default_download_dir")]
    pub dir: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.pagegrab.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref backend) = args.backend {
            self.backend.url = backend.clone();
        }

        if let Some(timeout) = args.timeout {
            self.backend.timeout_seconds = Some(timeout);
        }

        if let Some(ref dir) = args.download_dir {
            self.download.dir = dir.clone();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Backend client settings derived from this configuration.
    pub fn http_backend(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            base_url: self.backend.url.clone(),
            analyze_path: self.backend.analyze_path.clone(),
            download_path: self.backend.download_path.clone(),
            timeout_seconds: self.backend.timeout_seconds,
            download_dir: self.download.dir.clone(),
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
