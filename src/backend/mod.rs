//! Client side of the analysis backend.
//!
//! The controller talks to the backend only through the [`Backend`] trait;
//! [`HttpBackend`] is the `reqwest` implementation used by the CLI.

pub mod http;

pub use http::{HttpBackend, HttpBackendConfig};

use crate::models::{AnalysisResult, AnalyzeRequest, DownloadRequest};
use async_trait::async_trait;
use thiserror::Error;

/// Why a backend call did not produce a usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Non-OK status with a JSON body; `message` is its `error` field.
    #[error("server returned HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be parsed into the expected shape.
    #[error("unparseable response: {0}")]
    Decode(String),

    /// A downloaded attachment could not be written locally.
    #[error("failed to store download: {0}")]
    Storage(String),
}

impl BackendError {
    /// The message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the server answered with a parseable failure body.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, BackendError::Server { .. })
    }
}

/// The two endpoints the controller consumes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /analyze` with `{url}`.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, BackendError>;

    /// `POST /download` with `{url, filename}`. Returns the stored path.
    async fn download(&self, request: &DownloadRequest) -> Result<String, BackendError>;
}
