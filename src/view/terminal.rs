//! Terminal front end for the analysis view.
//!
//! The loading indicator is an `indicatif` spinner. The results area is a
//! buffer that is printed to stdout only when it is revealed, so a hidden
//! results area never reaches the terminal.

use crate::models::DownloadCommand;
use crate::view::{AnalysisView, Notifier};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

#[derive(Default)]
struct TerminalState {
    spinner: Option<ProgressBar>,
    code_blocks: Vec<String>,
    rows: Vec<DownloadCommand>,
}

/// Analysis view rendered to the terminal.
pub struct TerminalView {
    state: Mutex<TerminalState>,
    show_progress: bool,
}

impl TerminalView {
    /// Create a view. With `show_progress` off no spinner is drawn.
    pub fn new(show_progress: bool) -> Self {
        Self {
            state: Mutex::new(TerminalState::default()),
            show_progress,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AnalysisView for TerminalView {
    fn show_loading(&self) {
        if !self.show_progress {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Analyzing page...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.lock().spinner = Some(spinner);
    }

    fn hide_loading(&self) {
        if let Some(spinner) = self.lock().spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn show_results(&self) {
        let state = self.lock();
        print!("{}", render_results(&state.code_blocks, &state.rows));
    }

    fn hide_results(&self) {
        debug!("Results area hidden");
    }

    fn clear_code_blocks(&self) {
        self.lock().code_blocks.clear();
    }

    fn clear_file_list(&self) {
        self.lock().rows.clear();
    }

    fn append_code_block(&self, code: &str) {
        self.lock().code_blocks.push(code.to_string());
    }

    fn append_file_row(&self, command: &DownloadCommand) {
        self.lock().rows.push(command.clone());
    }

    // Prompts are read one at a time; there is no control to grey out.
    fn set_trigger_enabled(&self, enabled: bool) {
        debug!("Analyze trigger enabled: {}", enabled);
    }
}

/// Render the results area.
pub fn render_results(code_blocks: &[String], rows: &[DownloadCommand]) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n📄 Code blocks ({})\n\n", code_blocks.len()));
    for (i, code) in code_blocks.iter().enumerate() {
        output.push_str(&format!("--- [{}] ---\n", i + 1));
        output.push_str("```\n");
        output.push_str(code);
        if !code.ends_with('\n') {
            output.push('\n');
        }
        output.push_str("```\n\n");
    }

    output.push_str(&format!("📦 Files ({})\n\n", rows.len()));
    if rows.is_empty() {
        output.push_str("   No downloadable files found.\n");
    }
    for (i, row) in rows.iter().enumerate() {
        output.push_str(&format!("   [{}] {}  (Download)\n", i + 1, row.filename));
    }
    output.push('\n');

    output
}

/// Notices written to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        eprintln!("\n💬 {}", message);
    }
}
