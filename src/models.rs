//! Data models for the analysis backend.
//!
//! This module contains the request and response shapes exchanged with
//! the `/analyze` and `/download` endpoints, plus the per-row download
//! command handed to the view.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for the analyze endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Page URL to analyze.
    pub url: String,
}

/// A downloadable file identified by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    /// Display name of the file (last path segment of its link).
    pub filename: String,
    /// Absolute URL of the file.
    pub url: String,
}

/// Successful response from the analyze endpoint.
///
/// Both sequences are kept in the order the backend returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Text of each preformatted code block found on the page.
    pub code_blocks: Vec<String>,
    /// Downloadable files linked from the page.
    pub file_links: Vec<FileLink>,
}

/// Request body for the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

/// Successful JSON response from the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    /// Where the backend stored the file.
    pub path: String,
}

/// Failure body shared by both endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// The download action bound to one rendered file row.
///
/// Each row carries its own copy of the link, so activating a row never
/// depends on what was rendered after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCommand {
    pub url: String,
    pub filename: String,
}

impl DownloadCommand {
    /// Build the request body this command sends.
    pub fn to_request(&self) -> DownloadRequest {
        DownloadRequest {
            url: self.url.clone(),
            filename: self.filename.clone(),
        }
    }
}

impl From<&FileLink> for DownloadCommand {
    fn from(link: &FileLink) -> Self {
        Self {
            url: link.url.clone(),
            filename: link.filename.clone(),
        }
    }
}

impl fmt::Display for DownloadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.filename, self.url)
    }
}
