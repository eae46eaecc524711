//! Presentation capabilities used by the controller.
//!
//! The controller never looks anything up by identifier: it is handed an
//! [`AnalysisView`] for the page surface and a [`Notifier`] for blocking
//! notices, so any front end can provide them.

pub mod terminal;

pub use terminal::{TerminalNotifier, TerminalView};

use crate::models::DownloadCommand;

/// The page surface the analyze flow writes to.
pub trait AnalysisView: Send + Sync {
    fn show_loading(&self);
    fn hide_loading(&self);

    fn show_results(&self);
    fn hide_results(&self);

    fn clear_code_blocks(&self);
    fn clear_file_list(&self);

    /// Append one preformatted block after the existing ones.
    fn append_code_block(&self, code: &str);

    /// Append one file row with a download action bound to `command`.
    fn append_file_row(&self, command: &DownloadCommand);

    /// Enable or disable the analyze trigger.
    fn set_trigger_enabled(&self, enabled: bool);
}

/// Surface a message the user has to acknowledge.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
