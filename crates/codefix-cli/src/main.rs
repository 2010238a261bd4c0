use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use codefix_bridge::{ChannelNotifier, CommandRegistry, EditorBridge, FileHost, DEBUG_COMMAND};

/// codefix — AI code-fix review panel.
///
/// Opens the given file as the active document, requests an AI fix and
/// static analysis from the backend service, and lets you review, edit,
/// and apply the proposed fix from a side panel.
#[derive(Parser, Debug)]
#[command(name = "codefix", version, about)]
struct Cli {
    /// File to debug. Its text is captured only if the file matches the
    /// expected language.
    file: PathBuf,

    /// Override the expected document language.
    #[arg(long)]
    language: Option<String>,

    /// Override the backend service URL.
    #[arg(long)]
    service_url: Option<String>,

    /// Override the assets directory holding the panel template.
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file to avoid corrupting the TUI output. If the log file
    // can't be opened, silently discard logs rather than polluting the
    // alternate screen buffer.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codefix");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("codefix.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            // Fallback: discard all logs to avoid TUI corruption.
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    // Load config, then apply CLI overrides.
    let mut config = codefix_core::CodefixConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        codefix_core::CodefixConfig::default()
    });
    if let Some(language) = cli.language {
        config.editor.language = language;
    }
    if let Some(url) = cli.service_url {
        config.service.base_url = url;
    }
    if let Some(dir) = cli.assets_dir {
        config.panel.assets_dir = dir;
    }

    tracing::info!("Starting codefix v{}", env!("CARGO_PKG_VERSION"));

    // The editor host: a single file-backed document.
    let host = Arc::new(FileHost::open(cli.file)?);

    // Host notifications drain into the panel's status bar.
    let (notifier, notifications) = ChannelNotifier::new();

    let client = Arc::new(codefix_backend::ServiceClient::new(
        config.service.base_url.clone(),
        std::time::Duration::from_secs(config.service.timeout_seconds),
    ));

    // Command registration is process-wide state, constructed here and
    // dropped at exit.
    let mut registry = CommandRegistry::new();
    let bridge = EditorBridge::new(host, Arc::new(notifier), config);
    bridge.activate(&mut registry);

    // Invoke the command: open the panel surface.
    let handle = match registry.invoke(DEBUG_COMMAND) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("codefix: {e}");
            return Err(e.into());
        }
    };

    let mut app = codefix_tui::PanelApp::new(client, handle, notifications);
    app.run().await?;

    tracing::info!("codefix exited cleanly");
    Ok(())
}
