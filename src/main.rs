//! PassVault - Terminal Credential Client
//!
//! A vim-style TUI for viewing, searching and adding credentials stored
//! behind the local PassVault API.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod app;
mod input;
mod ui;
mod vault;

use api::{ApiClient, ApiWorker};
use app::{App, AppConfig};

const TICK: Duration = Duration::from_millis(100);

/// passvault - browse and add credentials on a local PassVault API
#[derive(Parser, Debug)]
#[command(name = "passvault", version, about)]
struct Cli {
    /// Base URL of the PassVault API
    #[arg(long, env = "PASSVAULT_ENDPOINT")]
    endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig> {
        let mut config = AppConfig::default();
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout_secs(secs)?;
        }
        if let Some(path) = self.log_file {
            config.log_path = path;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = cli.log_level.clone();
    let config = cli.into_config()?;

    init_logging(&config.log_path, &log_level)?;
    info!(endpoint = %config.endpoint, log = %config.log_path.display(), "starting passvault");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let client = ApiClient::new(&config.endpoint, config.request_timeout)?;
    let mut worker = ApiWorker::new(client, runtime.handle().clone());

    install_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    app.start();
    let result = run_app(&mut terminal, &mut app, &mut worker);

    // Restore terminal
    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "ui loop failed");
    }
    info!("exiting");
    result
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}

/// Leave raw mode and the alternate screen before the panic message prints.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        error!(panic = %info, "ui panicked");
        default_hook(info);
    }));
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &mut ApiWorker,
) -> Result<()> {
    loop {
        for request in app.take_requests() {
            worker.dispatch(request);
        }
        while let Some(event) = worker.try_next() {
            app.handle_api_event(event);
        }
        app.tick(Instant::now());

        terminal.draw(|frame| app.render(frame))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    let file = open_log_file(path)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "passvault",
            "--endpoint",
            "http://127.0.0.1:9000",
            "--timeout",
            "5",
            "--log-file",
            "/tmp/pv.log",
        ]);
        let config = cli.into_config().unwrap();

        assert_eq!(config.endpoint.port(), Some(9000));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_path, PathBuf::from("/tmp/pv.log"));
    }

    #[test]
    fn test_cli_rejects_scheme_less_endpoint() {
        let cli = Cli::parse_from(["passvault", "--endpoint", "localhost:8200"]);
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("passvault.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
