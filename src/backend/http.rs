//! `reqwest` implementation of the backend contract.
//!
//! Both endpoints take a JSON body and answer with JSON. The download
//! endpoint may instead answer with the raw file as an attachment
//! (`application/octet-stream` or `Content-Disposition: attachment`), in
//! which case the bytes are written to the local download directory. Any
//! other successful download body is read as `{path}`.

use crate::backend::{Backend, BackendError};
use crate::models::{AnalysisResult, AnalyzeRequest, DownloadRequest, DownloadResult, ErrorBody};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the backend, e.g. `http://localhost:5000`.
    pub base_url: String,
    pub analyze_path: String,
    pub download_path: String,
    /// Request timeout. `None` waits for the request to settle.
    pub timeout_seconds: Option<u64>,
    /// Where attachment downloads are written.
    pub download_dir: PathBuf,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            analyze_path: "/analyze".to_string(),
            download_path: "/download".to_string(),
            timeout_seconds: None,
            download_dir: PathBuf::from("."),
        }
    }
}

/// Backend reached over HTTP.
pub struct HttpBackend {
    config: HttpBackendConfig,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend client.
    pub fn new(config: HttpBackendConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to create HTTP client: {}", e)))?;

        info!("Using backend at {}", config.base_url);

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Full URL of an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, BackendError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        self.http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Transport(format!(
                        "request timed out after {}s",
                        self.config.timeout_seconds.unwrap_or_default()
                    ))
                } else if e.is_connect() {
                    BackendError::Transport(format!(
                        "cannot connect to backend at {}",
                        self.config.base_url
                    ))
                } else {
                    BackendError::Transport(e.to_string())
                }
            })
    }

    async fn store_attachment(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, BackendError> {
        let name = sanitize_filename(filename).ok_or_else(|| {
            BackendError::Decode(format!("refusing to store file named {:?}", filename))
        })?;

        tokio::fs::create_dir_all(&self.config.download_dir)
            .await
            .map_err(|e| {
                BackendError::Storage(format!(
                    "{}: {}",
                    self.config.download_dir.display(),
                    e
                ))
            })?;

        let target = self.config.download_dir.join(name);
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| BackendError::Storage(format!("{}: {}", target.display(), e)))?;

        info!("Stored {} bytes at {}", bytes.len(), target.display());
        Ok(target)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, BackendError> {
        let response = self.post(&self.config.analyze_path, request).await?;
        let status = response.status();
        let bytes = read_body(response).await?;

        if !status.is_success() {
            return Err(server_error(status, &bytes));
        }

        parse_json(&bytes)
    }

    async fn download(&self, request: &DownloadRequest) -> Result<String, BackendError> {
        let response = self.post(&self.config.download_path, request).await?;
        let status = response.status();
        let attachment = is_attachment(response.headers());
        let bytes = read_body(response).await?;

        if !status.is_success() {
            return Err(server_error(status, &bytes));
        }

        if !attachment {
            let result: DownloadResult = parse_json(&bytes)?;
            return Ok(result.path);
        }

        debug!("Download answered with an attachment for {}", request.filename);
        let stored = self.store_attachment(&request.filename, &bytes).await?;
        Ok(stored.display().to_string())
    }
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, BackendError> {
    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| BackendError::Transport(format!("failed to read response body: {}", e)))
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(bytes).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Map a non-OK response to an error. Only a parseable body counts as
/// server-reported; anything else is a decode failure.
fn server_error(status: StatusCode, bytes: &[u8]) -> BackendError {
    match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(body) => BackendError::Server {
            status: status.as_u16(),
            message: body.error,
        },
        Err(e) => BackendError::Decode(format!("HTTP {} with unparseable body: {}", status, e)),
    }
}

/// Whether a download response carries the file itself.
pub fn is_attachment(headers: &HeaderMap) -> bool {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default()
    };

    header(CONTENT_TYPE).starts_with("application/octet-stream")
        || header(CONTENT_DISPOSITION).starts_with("attachment")
}

/// Final path component of a requested filename, or `None` if nothing
/// safe remains.
pub fn sanitize_filename(name: &str) -> Option<&str> {
    let last = name.rsplit(|c: char| c == '/' || c == '\\').next()?.trim();
    if last.is_empty() || last == "." || last == ".." {
        return None;
    }
    // Windows drive prefixes such as `C:`
    if Path::new(last).components().count() != 1 || last.contains(':') {
        return None;
    }
    Some(last)
}
