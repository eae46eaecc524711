//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// PageGrab - pull code snippets and linked files out of a web page
///
/// Sends a page URL to an analysis backend, prints the code blocks it
/// found and lists the linked files, which can then be downloaded.
///
/// Examples:
///   pagegrab
///   pagegrab --url https://example.com/app
///   pagegrab --url https://example.com/app --download main.js
///   pagegrab --url https://example.com/app --download-all --backend http://10.0.0.5:5000
///   pagegrab --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Page URL to analyze
    ///
    /// Without it, pagegrab prompts for URLs interactively.
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Base URL of the analysis backend
    ///
    /// Defaults to the config file value, or http://localhost:5000.
    #[arg(short, long, value_name = "URL", env = "PAGEGRAB_BACKEND")]
    pub backend: Option<String>,

    /// Download the listed file after analysis (repeatable)
    #[arg(short, long, value_name = "NAME", requires = "url")]
    pub download: Vec<String>,

    /// Download every listed file after analysis
    #[arg(long, requires = "url", conflicts_with = "download")]
    pub download_all: bool,

    /// Directory for files the backend returns as attachments
    #[arg(long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Request timeout in seconds
    ///
    /// By default requests are awaited until they settle.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .pagegrab.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .pagegrab.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if let Some(ref backend) = self.backend {
            if !backend.starts_with("http://") && !backend.starts_with("https://") {
                return Err("Backend URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if self.download.iter().any(|name| name.trim().is_empty()) {
            return Err("--download needs a file name".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `[general] verbose` setting; `--quiet` wins
    /// over both it and `--verbose`.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether the run prompts for URLs instead of analyzing one.
    pub fn is_interactive(&self) -> bool {
        self.url.is_none()
    }
}
