//! Shared test helpers: a stub backend server and recording view doubles.

#![allow(dead_code)]

pub mod stub_server;

use pagegrab::backend::{HttpBackend, HttpBackendConfig};
use pagegrab::controller::AnalysisController;
use pagegrab::models::DownloadCommand;
use pagegrab::view::{AnalysisView, Notifier};
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Default, Clone)]
pub struct ViewState {
    pub loading: bool,
    pub loading_hidden: usize,
    pub results_visible: bool,
    pub code_blocks: Vec<String>,
    pub rows: Vec<DownloadCommand>,
}

/// View that keeps what a page would show.
#[derive(Default)]
pub struct RecordingView {
    state: Mutex<ViewState>,
}

impl RecordingView {
    pub fn state(&self) -> ViewState {
        self.state.lock().unwrap().clone()
    }
}

impl AnalysisView for RecordingView {
    fn show_loading(&self) {
        self.state.lock().unwrap().loading = true;
    }
    fn hide_loading(&self) {
        let mut state = self.state.lock().unwrap();
        state.loading = false;
        state.loading_hidden += 1;
    }
    fn show_results(&self) {
        self.state.lock().unwrap().results_visible = true;
    }
    fn hide_results(&self) {
        self.state.lock().unwrap().results_visible = false;
    }
    fn clear_code_blocks(&self) {
        self.state.lock().unwrap().code_blocks.clear();
    }
    fn clear_file_list(&self) {
        self.state.lock().unwrap().rows.clear();
    }
    fn append_code_block(&self, code: &str) {
        self.state.lock().unwrap().code_blocks.push(code.to_string());
    }
    fn append_file_row(&self, command: &DownloadCommand) {
        self.state.lock().unwrap().rows.push(command.clone());
    }
    fn set_trigger_enabled(&self, _enabled: bool) {}
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub type TestController = AnalysisController<HttpBackend, RecordingView, RecordingNotifier>;

pub fn http_backend(base_url: &str, download_dir: &Path) -> HttpBackend {
    HttpBackend::new(HttpBackendConfig {
        base_url: base_url.to_string(),
        download_dir: download_dir.to_path_buf(),
        timeout_seconds: Some(5),
        ..HttpBackendConfig::default()
    })
    .unwrap()
}

pub fn controller(base_url: &str, download_dir: &Path) -> TestController {
    AnalysisController::new(
        http_backend(base_url, download_dir),
        RecordingView::default(),
        RecordingNotifier::default(),
    )
}
