//! PageGrab - pull code snippets and linked files out of a web page
//!
//! A CLI client for a page analysis backend. It sends a URL to the
//! backend, prints the code blocks found on the page, lists the linked
//! files and downloads the ones the user picks.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, connection, failed analysis or download)

use anyhow::{Context, Result};
use pagegrab::backend::HttpBackend;
use pagegrab::cli::Args;
use pagegrab::config::{Config, CONFIG_FILE_NAME};
use pagegrab::controller::AnalysisController;
use pagegrab::session::{self, DownloadSelection};
use pagegrab::view::{TerminalNotifier, TerminalView};
use tokio::io::BufReader;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded before logging so `[general] verbose` can raise the level
    let (mut config, config_source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    info!("PageGrab v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration from {}: {:?}", config_source, config);

    match run(args, config).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .pagegrab.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to point at your backend and pick a download directory.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Build the controller and run a one-shot or interactive session.
async fn run(args: Args, config: Config) -> Result<i32> {
    let backend =
        HttpBackend::new(config.http_backend()).context("Failed to set up backend client")?;
    let controller =
        AnalysisController::new(backend, TerminalView::new(!args.quiet), TerminalNotifier);

    if args.is_interactive() {
        println!("🔍 PageGrab interactive mode (backend: {})", config.backend.url);
        session::run_interactive(&controller, BufReader::new(tokio::io::stdin())).await?;
        return Ok(0);
    }

    let url = args.url.as_deref().unwrap_or_default();
    let selection = DownloadSelection::from_args(&args);
    Ok(session::run_once(&controller, url, &selection).await)
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so it returns where the configuration
/// came from instead of logging it.
fn load_config(args: &Args) -> Result<(Config, String)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, config_path.display().to_string()));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, CONFIG_FILE_NAME.to_string())),
        Ok(None) => Ok((Config::default(), "defaults".to_string())),
        Err(e) => {
            eprintln!("⚠️  Failed to load config, using defaults: {:#}", e);
            Ok((Config::default(), "defaults".to_string()))
        }
    }
}
