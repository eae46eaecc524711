//! Terminal sessions around the controller.
//!
//! A one-shot run analyzes a single URL and optionally downloads some of
//! the listed files. An interactive run reads URLs and row numbers from
//! any async line source, which is stdin in the binary.

use crate::backend::Backend;
use crate::controller::{AnalysisController, AnalyzeOutcome, DownloadOutcome};
use crate::models::DownloadCommand;
use crate::view::{AnalysisView, Notifier};
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

/// Which rendered rows a one-shot run downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSelection {
    None,
    All,
    Named(Vec<String>),
}

impl DownloadSelection {
    pub fn from_args(args: &crate::cli::Args) -> Self {
        if args.download_all {
            DownloadSelection::All
        } else if args.download.is_empty() {
            DownloadSelection::None
        } else {
            DownloadSelection::Named(args.download.clone())
        }
    }

    /// Pick the rows to download. Returns the selected rows and the names
    /// that matched nothing.
    pub fn pick<'a>(&self, rows: &'a [DownloadCommand]) -> (Vec<&'a DownloadCommand>, Vec<String>) {
        match self {
            DownloadSelection::None => (Vec::new(), Vec::new()),
            DownloadSelection::All => (rows.iter().collect(), Vec::new()),
            DownloadSelection::Named(names) => {
                let mut picked = Vec::new();
                let mut missing = Vec::new();
                for name in names {
                    let matches: Vec<&DownloadCommand> =
                        rows.iter().filter(|r| r.filename == *name).collect();
                    if matches.is_empty() {
                        missing.push(name.clone());
                    }
                    picked.extend(matches);
                }
                (picked, missing)
            }
        }
    }
}

/// Analyze one URL and run the selected downloads. Returns the exit code.
pub async fn run_once<B, V, N>(
    controller: &AnalysisController<B, V, N>,
    url: &str,
    selection: &DownloadSelection,
) -> i32
where
    B: Backend,
    V: AnalysisView,
    N: Notifier,
{
    let rows = match controller.analyze(url).await {
        AnalyzeOutcome::Rendered(rows) => rows,
        _ => return 1,
    };

    let (picked, missing) = selection.pick(&rows);
    let mut exit_code = 0;

    for name in &missing {
        controller
            .notifier()
            .notify(&format!("No file named {} in the results", name));
        exit_code = 1;
    }

    for command in picked {
        if let DownloadOutcome::Failed(_) = controller.download_file(command).await {
            exit_code = 1;
        }
    }

    exit_code
}

/// Prompt for URLs until `quit` or end of input. After each rendered
/// analysis, prompt for row numbers to download until a blank line.
pub async fn run_interactive<B, V, N, R>(
    controller: &AnalysisController<B, V, N>,
    input: R,
) -> Result<()>
where
    B: Backend,
    V: AnalysisView,
    N: Notifier,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        prompt("🔗 Page URL ('quit' to exit): ")?;
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim() == "quit" {
            break;
        }

        let rows = match controller.analyze(&line).await {
            AnalyzeOutcome::Rendered(rows) => rows,
            outcome => {
                debug!("No rows to offer: {:?}", outcome);
                continue;
            }
        };
        if rows.is_empty() {
            continue;
        }

        loop {
            prompt(&format!(
                "⬇️  File number to download (1-{}, blank to continue): ",
                rows.len()
            ))?;
            let Some(choice) = lines.next_line().await.context("Failed to read input")? else {
                return Ok(());
            };
            let choice = choice.trim();
            if choice.is_empty() {
                break;
            }

            match parse_row_number(choice, rows.len()) {
                Some(index) => {
                    controller.download_file(&rows[index]).await;
                }
                None => controller
                    .notifier()
                    .notify(&format!("Enter a number between 1 and {}", rows.len())),
            }
        }
    }

    info!("Session ended");
    Ok(())
}

/// Parse a 1-based row number into an index.
pub fn parse_row_number(input: &str, row_count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= row_count => Some(n - 1),
        _ => None,
    }
}

fn prompt(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", text).context("Failed to write prompt")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
