//! The analysis controller.
//!
//! Orchestrates the two backend interactions and reflects their outcome in
//! the injected view:
//! - `analyze`: validate the URL, reset the view, request an analysis, then
//!   render code blocks and file rows in the order received
//! - `download_file`: request one file and report where it was stored
//!
//! Every failure ends the operation and is surfaced through the notifier.

use crate::backend::{Backend, BackendError};
use crate::models::{AnalyzeRequest, DownloadCommand};
use crate::view::{AnalysisView, Notifier};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

pub const EMPTY_URL_NOTICE: &str = "Please enter a URL";
pub const ANALYZE_FALLBACK_NOTICE: &str = "An error occurred";
pub const ANALYZE_TRANSPORT_NOTICE: &str = "An error occurred while analyzing the URL";
pub const DOWNLOAD_FALLBACK_NOTICE: &str = "Failed to download file";
pub const DOWNLOAD_TRANSPORT_NOTICE: &str = "An error occurred while downloading the file";

/// Result of one analyze trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    /// Input was empty; nothing was sent.
    Rejected,
    /// Another analysis was still pending; the trigger was ignored.
    Busy,
    /// Results were rendered. Carries the download action of each row.
    Rendered(Vec<DownloadCommand>),
    /// The request failed and a notice was shown.
    Failed(BackendError),
}

/// Result of one download action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(String),
    Failed(BackendError),
}

/// Drives the analyze and download flows against a backend.
pub struct AnalysisController<B, V, N> {
    backend: B,
    view: V,
    notifier: N,
    in_flight: AtomicBool,
}

impl<B, V, N> AnalysisController<B, V, N>
where
    B: Backend,
    V: AnalysisView,
    N: Notifier,
{
    pub fn new(backend: B, view: V, notifier: N) -> Self {
        Self {
            backend,
            view,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Whether an analysis request is still pending.
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Analyze the page at `input`.
    ///
    /// While a request is pending the trigger is disabled and further calls
    /// return [`AnalyzeOutcome::Busy`] without touching the view. The
    /// loading indicator is hidden exactly once per started request, on
    /// every path.
    pub async fn analyze(&self, input: &str) -> AnalyzeOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Analysis already pending, ignoring trigger");
            return AnalyzeOutcome::Busy;
        }

        let url = input.trim();
        if url.is_empty() {
            self.in_flight.store(false, Ordering::Release);
            self.notifier.notify(EMPTY_URL_NOTICE);
            return AnalyzeOutcome::Rejected;
        }

        let _pending = PendingAnalysis::begin(&self.view, &self.in_flight);
        self.view.hide_results();
        self.view.clear_code_blocks();
        self.view.clear_file_list();

        info!("Analyzing {}", url);
        let request = AnalyzeRequest {
            url: url.to_string(),
        };

        match self.backend.analyze(&request).await {
            Ok(result) => {
                debug!(
                    "Received {} code blocks and {} file links",
                    result.code_blocks.len(),
                    result.file_links.len()
                );

                for code in &result.code_blocks {
                    self.view.append_code_block(code);
                }

                let rows: Vec<DownloadCommand> =
                    result.file_links.iter().map(DownloadCommand::from).collect();
                for row in &rows {
                    self.view.append_file_row(row);
                }

                self.view.show_results();
                AnalyzeOutcome::Rendered(rows)
            }
            Err(e) => {
                warn!("Analysis of {} failed: {}", url, e);
                self.notifier.notify(&analyze_notice(&e));
                AnalyzeOutcome::Failed(e)
            }
        }
    }

    /// Run the download action bound to one file row.
    pub async fn download_file(&self, command: &DownloadCommand) -> DownloadOutcome {
        info!("Downloading {}", command);

        match self.backend.download(&command.to_request()).await {
            Ok(path) => {
                self.notifier
                    .notify(&format!("File downloaded successfully to: {}", path));
                DownloadOutcome::Saved(path)
            }
            Err(e) => {
                warn!("Download of {} failed: {}", command.filename, e);
                self.notifier.notify(&download_notice(&e));
                DownloadOutcome::Failed(e)
            }
        }
    }
}

fn analyze_notice(error: &BackendError) -> String {
    if error.is_server_reported() {
        error
            .server_message()
            .unwrap_or(ANALYZE_FALLBACK_NOTICE)
            .to_string()
    } else {
        ANALYZE_TRANSPORT_NOTICE.to_string()
    }
}

fn download_notice(error: &BackendError) -> String {
    if error.is_server_reported() {
        error
            .server_message()
            .unwrap_or(DOWNLOAD_FALLBACK_NOTICE)
            .to_string()
    } else {
        DOWNLOAD_TRANSPORT_NOTICE.to_string()
    }
}

/// Loading state of one analyze request. Dropping it hides the loading
/// indicator and re-enables the trigger, even if the request future is
/// dropped before it settles.
struct PendingAnalysis<'a, V: AnalysisView> {
    view: &'a V,
    in_flight: &'a AtomicBool,
}

impl<'a, V: AnalysisView> PendingAnalysis<'a, V> {
    fn begin(view: &'a V, in_flight: &'a AtomicBool) -> Self {
        view.set_trigger_enabled(false);
        view.show_loading();
        Self { view, in_flight }
    }
}

impl<V: AnalysisView> Drop for PendingAnalysis<'_, V> {
    fn drop(&mut self) {
        self.view.hide_loading();
        self.view.set_trigger_enabled(true);
        self.in_flight.store(false, Ordering::Release);
    }
}
